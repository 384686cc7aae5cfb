//! Repository layer for persisting products to SQLite

pub mod product_repo;
pub mod values;

pub use product_repo::{ProductRepo, RawRows};
