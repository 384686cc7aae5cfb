//! Estoque Core - product model, error facility and logging facility
//!
//! This crate provides:
//! - The `Product` record, its typed fields and their logical labels
//! - Validated table names
//! - Structured errors (`ExError`, `ExErrorKind`, `EstoqueError`)
//! - The logging facility shared by the store and the CLI

pub mod errors;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use errors::{EstoqueError, ExError, ExErrorKind, Result};
pub use model::{LabeledFields, Product, ProductField, ProductFields, TableName};
