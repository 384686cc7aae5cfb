//! Sentinel-returning product operations
//!
//! Free functions that keep the original call contract for existing
//! callers: every failure is logged at error level and turned into `None`,
//! an empty listing, or `false`. A missing row and a broken database look
//! the same here, and `update`/`delete` report success even when no row has
//! the id. New code should use [`ProductStore`](crate::ProductStore).

use crate::db;
use crate::errors::Result;
use crate::repo::values::labeled_values;
use crate::repo::ProductRepo;
use crate::schema;
use estoque_core::errors::ExError;
use estoque_core::model::{LabeledFields, TableName};
use rusqlite::Connection;
use serde_json::Value;
use std::path::Path;

/// One row as column name / value pairs
pub type LabeledRow = serde_json::Map<String, Value>;

/// Open a connection to the database file, creating it if absent
///
/// Returns `None` (after logging) when the file cannot be opened.
pub fn connect<P: AsRef<Path>>(database_name: P) -> Option<Connection> {
    match db::open(database_name.as_ref()) {
        Ok(conn) => Some(conn),
        Err(err) => {
            tracing::error!(
                database = %database_name.as_ref().display(),
                error = %err,
                "failed to connect to database"
            );
            None
        }
    }
}

/// Create the products table if it does not exist
pub fn ensure_schema<P: AsRef<Path>>(database_name: P, table_name: &str) {
    let created = run(database_name, table_name, "create table", |conn, table| {
        schema::ensure_schema(conn, table)
    });
    if created.is_some() {
        tracing::info!(table = table_name, "table verified/created");
    }
}

/// Insert a product from labeled fields and return its new id
///
/// Labels missing from `fields` are stored as NULL; a missing required
/// label therefore fails the write and yields `None`.
pub fn insert<P: AsRef<Path>>(
    database_name: P,
    table_name: &str,
    fields: &LabeledFields,
) -> Option<i64> {
    run(database_name, table_name, "insert product", |conn, table| {
        ProductRepo::insert_values(conn, table, &labeled_values(fields))
    })
}

/// Select every row; `(vec![], vec![])` on failure
pub fn list_all<P: AsRef<Path>>(
    database_name: P,
    table_name: &str,
) -> (Vec<String>, Vec<Vec<Value>>) {
    run(database_name, table_name, "select products", |conn, table| {
        ProductRepo::list_raw(conn, table)
    })
    .map(|raw| (raw.columns, raw.rows))
    .unwrap_or_default()
}

/// Select one row by id; `None` when absent or on failure
pub fn get_by_id<P: AsRef<Path>>(
    database_name: P,
    table_name: &str,
    id: i64,
) -> Option<LabeledRow> {
    run(database_name, table_name, "select product by id", |conn, table| {
        ProductRepo::get_raw(conn, table, id)
    })
    .flatten()
}

/// Overwrite every field of the row with this id
///
/// `true` whenever the statement ran, including when no row matched.
pub fn update<P: AsRef<Path>>(
    database_name: P,
    table_name: &str,
    id: i64,
    fields: &LabeledFields,
) -> bool {
    run(database_name, table_name, "update product", |conn, table| {
        ProductRepo::update_values(conn, table, id, &labeled_values(fields))
    })
    .is_some()
}

/// Delete the row with this id
///
/// `true` whenever the statement ran, including when no row matched.
pub fn delete<P: AsRef<Path>>(database_name: P, table_name: &str, id: i64) -> bool {
    run(database_name, table_name, "delete product", |conn, table| {
        ProductRepo::delete(conn, table, id)
    })
    .is_some()
}

/// Validate the table name, connect and run one statement, logging failures
///
/// A rejected table name never opens (or creates) the database file.
fn run<P, T, F>(database_name: P, table_name: &str, action: &str, f: F) -> Option<T>
where
    P: AsRef<Path>,
    F: FnOnce(&Connection, &TableName) -> Result<T>,
{
    let result = TableName::parse(table_name)
        .map_err(ExError::from)
        .and_then(|table| {
            let conn = db::open(database_name.as_ref())?;
            f(&conn, &table)
        });

    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::error!(
                table = table_name,
                err_code = err.code(),
                error = %err,
                "failed to {}",
                action
            );
            None
        }
    }
}
