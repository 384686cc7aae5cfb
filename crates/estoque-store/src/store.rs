//! Product store with explicit results
//!
//! Each operation opens its own connection, runs one statement and drops
//! the connection before returning, on success and failure alike. Nothing
//! is held between calls.
//!
//! Errors are returned, not swallowed: `get_by_id` answers `Ok(None)` for a
//! missing row, and `update`/`delete` fail with `NotFound` when no row has
//! the id.

use crate::config::StoreConfig;
use crate::db;
use crate::errors::{product_not_found, Result};
use crate::repo::ProductRepo;
use crate::schema;
use estoque_core::errors::ExError;
use estoque_core::model::{Product, ProductFields, TableName};
use estoque_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::Connection;
use serde::Serialize;
use std::time::Instant;

/// All products with the table's column names
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductListing {
    pub columns: Vec<String>,
    pub products: Vec<Product>,
}

impl ProductListing {
    /// Products whose quantity has dropped below their minimum stock
    pub fn below_minimum(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_below_minimum())
    }
}

/// Persistence for one products table in one SQLite file
#[derive(Debug, Clone)]
pub struct ProductStore {
    config: StoreConfig,
}

impl ProductStore {
    /// Create a store from its configuration
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Create a store for `table` inside the database file `database`
    pub fn open(database: impl Into<std::path::PathBuf>, table: &str) -> Result<Self> {
        Ok(Self::new(StoreConfig::new(database, table)?))
    }

    /// Get the store configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Get the products table name
    pub fn table(&self) -> &TableName {
        self.config.table()
    }

    /// Open a fresh connection to the database file
    ///
    /// The file is created if it does not exist.
    pub fn connect(&self) -> Result<Connection> {
        db::open(self.config.database())
    }

    /// Create the products table if it does not exist
    pub fn ensure_schema(&self) -> Result<()> {
        const OP: &str = "product_ensure_schema";
        log_op_start!(OP, table = self.table().as_str());
        let start = Instant::now();

        self.with_connection(|conn| schema::ensure_schema(conn, self.table()))
            .map_err(|e| self.fail(OP, start, e))?;

        log_op_end!(
            OP,
            duration_ms = elapsed_ms(start),
            table = self.table().as_str()
        );
        Ok(())
    }

    /// Insert a product and return the id the store assigned
    pub fn insert(&self, fields: &ProductFields) -> Result<i64> {
        const OP: &str = "product_insert";
        log_op_start!(OP, table = self.table().as_str());
        let start = Instant::now();

        let id = self
            .with_connection(|conn| ProductRepo::insert(conn, self.table(), fields))
            .map_err(|e| self.fail(OP, start, e))?;

        log_op_end!(
            OP,
            duration_ms = elapsed_ms(start),
            table = self.table().as_str(),
            product_id = id
        );
        Ok(id)
    }

    /// List every product in storage order
    pub fn list_all(&self) -> Result<ProductListing> {
        const OP: &str = "product_list";
        log_op_start!(OP, table = self.table().as_str());
        let start = Instant::now();

        let (columns, products) = self
            .with_connection(|conn| ProductRepo::list(conn, self.table()))
            .map_err(|e| self.fail(OP, start, e))?;

        log_op_end!(
            OP,
            duration_ms = elapsed_ms(start),
            table = self.table().as_str(),
            rows = products.len() as u64
        );
        Ok(ProductListing { columns, products })
    }

    /// Get a product by id; `Ok(None)` when no row has the id
    pub fn get_by_id(&self, id: i64) -> Result<Option<Product>> {
        const OP: &str = "product_get";
        log_op_start!(OP, table = self.table().as_str(), product_id = id);
        let start = Instant::now();

        let product = self
            .with_connection(|conn| ProductRepo::get(conn, self.table(), id))
            .map_err(|e| self.fail(OP, start, e))?;

        log_op_end!(
            OP,
            duration_ms = elapsed_ms(start),
            table = self.table().as_str(),
            product_id = id,
            found = product.is_some()
        );
        Ok(product)
    }

    /// Overwrite every field of an existing product
    pub fn update(&self, id: i64, fields: &ProductFields) -> Result<()> {
        const OP: &str = "product_update";
        log_op_start!(OP, table = self.table().as_str(), product_id = id);
        let start = Instant::now();

        let rows = self
            .with_connection(|conn| ProductRepo::update(conn, self.table(), id, fields))
            .map_err(|e| self.fail(OP, start, e))?;
        if rows == 0 {
            return Err(self.fail(OP, start, product_not_found(self.table(), id)));
        }

        log_op_end!(
            OP,
            duration_ms = elapsed_ms(start),
            table = self.table().as_str(),
            product_id = id
        );
        Ok(())
    }

    /// Remove an existing product
    pub fn delete(&self, id: i64) -> Result<()> {
        const OP: &str = "product_delete";
        log_op_start!(OP, table = self.table().as_str(), product_id = id);
        let start = Instant::now();

        let rows = self
            .with_connection(|conn| ProductRepo::delete(conn, self.table(), id))
            .map_err(|e| self.fail(OP, start, e))?;
        if rows == 0 {
            return Err(self.fail(OP, start, product_not_found(self.table(), id)));
        }

        log_op_end!(
            OP,
            duration_ms = elapsed_ms(start),
            table = self.table().as_str(),
            product_id = id
        );
        Ok(())
    }

    /// Count the products in the table
    pub fn count(&self) -> Result<i64> {
        const OP: &str = "product_count";
        log_op_start!(OP, table = self.table().as_str());
        let start = Instant::now();

        let count = self
            .with_connection(|conn| ProductRepo::count(conn, self.table()))
            .map_err(|e| self.fail(OP, start, e))?;

        log_op_end!(
            OP,
            duration_ms = elapsed_ms(start),
            table = self.table().as_str(),
            rows = count
        );
        Ok(count)
    }

    /// Run `f` on a connection that is dropped as soon as `f` returns
    fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.connect()?;
        f(&conn)
    }

    /// Tag an operation failure with the table, log it and hand it back
    fn fail(&self, op: &'static str, start: Instant, err: ExError) -> ExError {
        let err = err.with_table(self.table().as_str());
        log_op_error!(
            op,
            err.clone(),
            duration_ms = elapsed_ms(start),
            table = self.table().as_str()
        );
        err
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
