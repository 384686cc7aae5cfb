//! Conversions between product fields, JSON values and SQLite values

use estoque_core::model::{LabeledFields, ProductField, ProductFields};
use rusqlite::types::Value as SqlValue;
use serde_json::Value as JsonValue;

/// Bind values for every non-id field, in column order
pub fn field_values(fields: &ProductFields) -> Vec<SqlValue> {
    ProductField::ALL
        .into_iter()
        .map(|field| match field {
            ProductField::Name => SqlValue::Text(fields.name.clone()),
            ProductField::Quantity => SqlValue::Integer(fields.quantity),
            ProductField::PurchasePrice => SqlValue::Real(fields.purchase_price),
            ProductField::Image => optional_text(&fields.image),
            ProductField::TagColor => optional_text(&fields.tag_color),
            ProductField::MinimumStock => fields.minimum_stock.map_or(SqlValue::Null, SqlValue::Integer),
            ProductField::PurchaseDate => optional_text(&fields.purchase_date),
            ProductField::Description => optional_text(&fields.description),
        })
        .collect()
}

/// Bind values for every non-id field, read from a labeled map
///
/// Absent labels bind as NULL, so the table's NOT NULL constraints decide
/// whether the write succeeds. Labels that match no field are ignored.
pub fn labeled_values(map: &LabeledFields) -> Vec<SqlValue> {
    ProductField::ALL
        .into_iter()
        .map(|field| map.get(field.label()).map_or(SqlValue::Null, json_to_sql))
        .collect()
}

/// Convert a JSON value into the SQLite value it binds as
pub fn json_to_sql(value: &JsonValue) -> SqlValue {
    match value {
        JsonValue::Null => SqlValue::Null,
        JsonValue::Bool(b) => SqlValue::Integer(i64::from(*b)),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => n.as_f64().map_or(SqlValue::Null, SqlValue::Real),
        },
        JsonValue::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

/// Convert a stored SQLite value into JSON
///
/// Blobs have no JSON form and come back hex encoded.
pub fn sql_to_json(value: SqlValue) -> JsonValue {
    match value {
        SqlValue::Null => JsonValue::Null,
        SqlValue::Integer(i) => JsonValue::from(i),
        SqlValue::Real(f) => JsonValue::from(f),
        SqlValue::Text(s) => JsonValue::String(s),
        SqlValue::Blob(bytes) => JsonValue::String(hex::encode(bytes)),
    }
}

fn optional_text(value: &Option<String>) -> SqlValue {
    value.clone().map_or(SqlValue::Null, SqlValue::Text)
}
