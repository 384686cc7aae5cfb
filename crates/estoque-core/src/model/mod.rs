pub mod product;
pub mod table;

pub use product::{LabeledFields, Product, ProductField, ProductFields, ID_COLUMN};
pub use table::TableName;
