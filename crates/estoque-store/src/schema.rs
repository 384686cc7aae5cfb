//! Products table schema
//!
//! The table is created on demand with `CREATE TABLE IF NOT EXISTS`; there
//! is no versioning and an existing table is never altered.

use crate::errors::{from_rusqlite, Result};
use estoque_core::model::{ProductField, TableName, ID_COLUMN};
use rusqlite::{Connection, OptionalExtension};

/// Column type, nullability and stored-type check for a product field
///
/// Column affinity alone keeps values it cannot convert (a fractional
/// quantity, a non-numeric price); the `typeof` check rejects them.
fn column_definition(field: ProductField) -> String {
    let (sql_type, stored_types) = match field {
        ProductField::Quantity | ProductField::MinimumStock => ("INTEGER", "'integer'"),
        ProductField::PurchasePrice => ("REAL", "'real', 'integer'"),
        ProductField::Name
        | ProductField::Image
        | ProductField::TagColor
        | ProductField::PurchaseDate
        | ProductField::Description => ("TEXT", "'text'"),
    };
    let column = field.column();
    if field.is_required() {
        format!("{sql_type} NOT NULL CHECK (typeof({column}) IN ({stored_types}))")
    } else {
        format!("{sql_type} CHECK (typeof({column}) IN ({stored_types}, 'null'))")
    }
}

/// Build the `CREATE TABLE IF NOT EXISTS` statement for a products table
pub fn create_table_sql(table: &TableName) -> String {
    let columns: Vec<String> = ProductField::ALL
        .into_iter()
        .map(|field| format!("{} {}", field.column(), column_definition(field)))
        .collect();

    format!(
        "CREATE TABLE IF NOT EXISTS \"{}\" (\n    {} INTEGER PRIMARY KEY AUTOINCREMENT,\n    {}\n)",
        table,
        ID_COLUMN,
        columns.join(",\n    ")
    )
}

/// Create the products table if it does not exist yet
pub fn ensure_schema(conn: &Connection, table: &TableName) -> Result<()> {
    conn.execute(&create_table_sql(table), [])
        .map_err(from_rusqlite)?;
    Ok(())
}

/// Check whether a table with this name exists
pub fn table_exists(conn: &Connection, table: &TableName) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table.as_str()],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;
    Ok(found.is_some())
}

/// Column names of a table in declaration order
pub fn column_names(conn: &Connection, table: &TableName) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info(\"{}\")", table))
        .map_err(from_rusqlite)?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    fn products() -> TableName {
        TableName::default()
    }

    #[test]
    fn test_create_table_sql_lists_columns_in_order() {
        let sql = create_table_sql(&products());

        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS \"products\""));
        let name_at = sql.find("name TEXT NOT NULL").unwrap();
        let description_at = sql.find("description TEXT").unwrap();
        assert!(name_at < description_at);
        assert!(sql.contains("id INTEGER PRIMARY KEY AUTOINCREMENT"));
        assert!(sql.contains("quantity INTEGER NOT NULL CHECK (typeof(quantity) IN ('integer'))"));
        assert!(sql.contains("minimum_stock INTEGER CHECK (typeof(minimum_stock) IN ('integer', 'null'))"));
    }

    #[test]
    fn test_schema_rejects_values_of_the_wrong_stored_type() {
        let conn = open_in_memory().unwrap();
        ensure_schema(&conn, &products()).unwrap();

        let fractional = conn.execute(
            "INSERT INTO products (name, quantity, purchase_price) VALUES ('Odd', 2.5, 1.0)",
            [],
        );
        let wordy_price = conn.execute(
            "INSERT INTO products (name, quantity, purchase_price) VALUES ('Odd', 2, 'cheap')",
            [],
        );
        let integral_price = conn.execute(
            "INSERT INTO products (name, quantity, purchase_price, minimum_stock) \
             VALUES ('Even', 2, 3, NULL)",
            [],
        );

        assert!(fractional.is_err());
        assert!(wordy_price.is_err());
        assert!(integral_price.is_ok());
    }

    #[test]
    fn test_ensure_schema_creates_table() {
        let conn = open_in_memory().unwrap();
        assert!(!table_exists(&conn, &products()).unwrap());

        ensure_schema(&conn, &products()).unwrap();

        assert!(table_exists(&conn, &products()).unwrap());
        assert_eq!(
            column_names(&conn, &products()).unwrap(),
            vec![
                "id",
                "name",
                "quantity",
                "purchase_price",
                "image",
                "tag_color",
                "minimum_stock",
                "purchase_date",
                "description",
            ]
        );
    }

    #[test]
    fn test_ensure_schema_idempotent() {
        let conn = open_in_memory().unwrap();
        ensure_schema(&conn, &products()).unwrap();
        conn.execute(
            "INSERT INTO products (name, quantity, purchase_price) VALUES ('Widget', 1, 1.0)",
            [],
        )
        .unwrap();

        ensure_schema(&conn, &products()).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1, "Existing rows must survive a second ensure_schema");
    }

    #[test]
    fn test_column_names_of_missing_table_is_empty() {
        let conn = open_in_memory().unwrap();
        assert!(column_names(&conn, &products()).unwrap().is_empty());
    }
}
