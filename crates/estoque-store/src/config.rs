//! Store configuration

use crate::errors::Result;
use estoque_core::errors::ExError;
use estoque_core::TableName;
use std::path::{Path, PathBuf};

/// Where products live: a database file and a table inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    database: PathBuf,
    table: TableName,
}

impl StoreConfig {
    /// Database file used when the caller names none
    pub const DEFAULT_DATABASE: &'static str = "estoque.db";

    /// Create a config, validating the table name
    pub fn new(database: impl Into<PathBuf>, table: &str) -> Result<Self> {
        let table = TableName::parse(table).map_err(ExError::from)?;
        Ok(Self::with_table(database, table))
    }

    /// Create a config from an already validated table name
    pub fn with_table(database: impl Into<PathBuf>, table: TableName) -> Self {
        Self {
            database: database.into(),
            table,
        }
    }

    /// Path of the database file
    pub fn database(&self) -> &Path {
        &self.database
    }

    /// Table holding the products
    pub fn table(&self) -> &TableName {
        &self.table
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::with_table(Self::DEFAULT_DATABASE, TableName::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estoque_core::ExErrorKind;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.database(), Path::new("estoque.db"));
        assert_eq!(config.table().as_str(), "products");
    }

    #[test]
    fn test_new_rejects_bad_table() {
        let err = StoreConfig::new("estoque.db", "products--").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }
}
