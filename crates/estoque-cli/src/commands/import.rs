//! Import command
//!
//! Usage: estoque import <FILE>
//!
//! The file holds a JSON array of records keyed by field label:
//!
//! ```json
//! [{"Name": "Widget", "Quantity": 10, "Purchase Price": 2.5, "Purchase Date": "2024-01-15"}]
//! ```

use super::CommandResult;
use clap::Args;
use estoque_core::errors::ExError;
use estoque_core::model::{LabeledFields, ProductFields};
use estoque_store::ProductStore;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to a JSON file of labeled product records
    pub path: PathBuf,
}

/// Execute import command
///
/// A bad record is reported and skipped; the command fails at the end if
/// any record was skipped.
pub fn execute(store: &ProductStore, args: ImportArgs) -> CommandResult {
    let text = std::fs::read_to_string(&args.path)?;
    let records: Vec<LabeledFields> = serde_json::from_str(&text)?;

    println!("Importing {}...", args.path.display());
    let mut failed = 0;
    for (index, record) in records.iter().enumerate() {
        match import_record(store, record) {
            Ok(id) => println!("✓ Record {} imported as product {}", index + 1, id),
            Err(e) => {
                failed += 1;
                eprintln!("✗ Record {} skipped: {}", index + 1, e);
            }
        }
    }

    println!(
        "{} of {} record(s) imported",
        records.len() - failed,
        records.len()
    );
    if failed > 0 {
        return Err(format!("{} record(s) could not be imported", failed).into());
    }
    Ok(())
}

fn import_record(store: &ProductStore, record: &LabeledFields) -> Result<i64, ExError> {
    let fields = ProductFields::from_labeled(record).map_err(ExError::from)?;
    store.insert(&fields)
}
