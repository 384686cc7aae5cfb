//! SQLite repository for product rows
//!
//! Statement-level operations over an already open connection. Each call
//! runs exactly one statement in SQLite's autocommit mode.

use crate::errors::{from_rusqlite, Result};
use crate::repo::values::{field_values, sql_to_json};
use estoque_core::model::{Product, ProductField, ProductFields, TableName, ID_COLUMN};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use serde_json::Value as JsonValue;

/// Column names plus rows of loosely typed values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRows {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<JsonValue>>,
}

/// SQLite repository for products
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a row from bind values in column order and return its id
    pub fn insert_values(conn: &Connection, table: &TableName, values: &[SqlValue]) -> Result<i64> {
        conn.execute(&insert_sql(table), params_from_iter(values))
            .map_err(from_rusqlite)?;
        Ok(conn.last_insert_rowid())
    }

    /// Insert a product and return its assigned id
    pub fn insert(conn: &Connection, table: &TableName, fields: &ProductFields) -> Result<i64> {
        Self::insert_values(conn, table, &field_values(fields))
    }

    /// Overwrite every non-id column of the row with this id
    ///
    /// Returns the number of rows changed (0 when no row has the id).
    pub fn update_values(
        conn: &Connection,
        table: &TableName,
        id: i64,
        values: &[SqlValue],
    ) -> Result<usize> {
        let params = values.iter().cloned().chain(std::iter::once(SqlValue::Integer(id)));
        conn.execute(&update_sql(table), params_from_iter(params))
            .map_err(from_rusqlite)
    }

    /// Overwrite a product's fields; returns the number of rows changed
    pub fn update(
        conn: &Connection,
        table: &TableName,
        id: i64,
        fields: &ProductFields,
    ) -> Result<usize> {
        Self::update_values(conn, table, id, &field_values(fields))
    }

    /// Delete the row with this id; returns the number of rows removed
    pub fn delete(conn: &Connection, table: &TableName, id: i64) -> Result<usize> {
        conn.execute(
            &format!("DELETE FROM \"{}\" WHERE {} = ?1", table, ID_COLUMN),
            [id],
        )
        .map_err(from_rusqlite)
    }

    /// Get a product by id
    pub fn get(conn: &Connection, table: &TableName, id: i64) -> Result<Option<Product>> {
        let mut stmt = conn
            .prepare(&select_by_id_sql(table))
            .map_err(from_rusqlite)?;

        let product = stmt
            .query_row([id], product_from_row)
            .optional()
            .map_err(from_rusqlite)?;

        Ok(product)
    }

    /// List all products with the table's column names
    ///
    /// No ORDER BY is applied; rows come back in storage order.
    pub fn list(conn: &Connection, table: &TableName) -> Result<(Vec<String>, Vec<Product>)> {
        let mut stmt = conn
            .prepare(&select_all_sql(table))
            .map_err(from_rusqlite)?;
        let columns = owned_column_names(&stmt);

        let products = stmt
            .query_map([], product_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok((columns, products))
    }

    /// List all rows as JSON values, whatever their column types
    pub fn list_raw(conn: &Connection, table: &TableName) -> Result<RawRows> {
        let mut stmt = conn
            .prepare(&select_all_sql(table))
            .map_err(from_rusqlite)?;
        let columns = owned_column_names(&stmt);
        let width = columns.len();

        let rows = stmt
            .query_map([], |row| raw_row(row, width))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(RawRows { columns, rows })
    }

    /// Get one row as column name / JSON value pairs
    pub fn get_raw(
        conn: &Connection,
        table: &TableName,
        id: i64,
    ) -> Result<Option<serde_json::Map<String, JsonValue>>> {
        let mut stmt = conn
            .prepare(&select_by_id_sql(table))
            .map_err(from_rusqlite)?;
        let columns = owned_column_names(&stmt);
        let width = columns.len();

        let values = stmt
            .query_row([id], |row| raw_row(row, width))
            .optional()
            .map_err(from_rusqlite)?;

        Ok(values.map(|values| columns.into_iter().zip(values).collect()))
    }

    /// Count the rows in the table
    pub fn count(conn: &Connection, table: &TableName) -> Result<i64> {
        conn.query_row(&format!("SELECT COUNT(*) FROM \"{}\"", table), [], |row| {
            row.get(0)
        })
        .map_err(from_rusqlite)
    }
}

fn field_columns() -> impl Iterator<Item = &'static str> {
    ProductField::ALL.into_iter().map(ProductField::column)
}

fn insert_sql(table: &TableName) -> String {
    let columns: Vec<&str> = field_columns().collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT INTO \"{}\" ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders.join(", ")
    )
}

fn update_sql(table: &TableName) -> String {
    let assignments: Vec<String> = field_columns()
        .enumerate()
        .map(|(i, column)| format!("{} = ?{}", column, i + 1))
        .collect();
    format!(
        "UPDATE \"{}\" SET {} WHERE {} = ?{}",
        table,
        assignments.join(", "),
        ID_COLUMN,
        assignments.len() + 1
    )
}

fn select_all_sql(table: &TableName) -> String {
    format!("SELECT * FROM \"{}\"", table)
}

fn select_by_id_sql(table: &TableName) -> String {
    format!("SELECT * FROM \"{}\" WHERE {} = ?1", table, ID_COLUMN)
}

fn owned_column_names(stmt: &rusqlite::Statement<'_>) -> Vec<String> {
    stmt.column_names().into_iter().map(str::to_string).collect()
}

fn raw_row(row: &Row<'_>, width: usize) -> rusqlite::Result<Vec<JsonValue>> {
    (0..width)
        .map(|i| row.get::<_, SqlValue>(i).map(sql_to_json))
        .collect()
}

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(ID_COLUMN)?,
        fields: ProductFields {
            name: row.get(ProductField::Name.column())?,
            quantity: row.get(ProductField::Quantity.column())?,
            purchase_price: row.get(ProductField::PurchasePrice.column())?,
            image: row.get(ProductField::Image.column())?,
            tag_color: row.get(ProductField::TagColor.column())?,
            minimum_stock: row.get(ProductField::MinimumStock.column())?,
            purchase_date: row.get(ProductField::PurchaseDate.column())?,
            description: row.get(ProductField::Description.column())?,
        },
    })
}
