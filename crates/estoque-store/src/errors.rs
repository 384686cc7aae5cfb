//! Error handling for estoque-store
//!
//! Wraps estoque-core ExError with store-specific helpers

use estoque_core::errors::{ExError, ExErrorKind};
use estoque_core::TableName;
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an error for a database file that could not be opened
pub fn connection_error(path: &Path, err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("connect")
        .with_message(format!("Cannot open {}: {}", path.display(), err))
}

/// Create an error for an id no row answers to
pub fn product_not_found(table: &TableName, id: i64) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_table(table.as_str())
        .with_entity_id(id.to_string())
        .with_message(format!("Product not found: {}", id))
}
