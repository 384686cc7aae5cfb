//! Estoque Store - SQLite persistence for the products table
//!
//! Provides:
//! - Per-call connection helpers
//! - Schema creation for a products table
//! - A statement-level repository over an open connection
//! - `ProductStore`, the typed store with explicit errors
//! - `legacy`, the same operations with sentinel results

pub mod config;
pub mod db;
pub mod errors;
pub mod legacy;
pub mod repo;
pub mod schema;
pub mod store;

// Re-export key types
pub use config::StoreConfig;
pub use errors::Result;
pub use store::{ProductListing, ProductStore};
