//! Estoque CLI
//!
//! Command-line interface for the product inventory store

use clap::{Parser, Subcommand, ValueEnum};
use estoque_core::logging_facility::{init, Profile};
use estoque_store::{ProductStore, StoreConfig};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "estoque")]
#[command(about = "Estoque - product inventory store", long_about = None)]
struct Cli {
    /// SQLite database file (created if absent)
    #[arg(long, global = true, default_value = StoreConfig::DEFAULT_DATABASE)]
    db: PathBuf,

    /// Products table name
    #[arg(long, global = true, default_value = estoque_core::TableName::DEFAULT)]
    table: String,

    /// Emit operation logs on stderr in this format
    #[arg(long, global = true, value_enum)]
    log: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the products table if it does not exist
    Init,
    /// Add a product
    Add(commands::product::ProductArgs),
    /// List all products
    List(commands::product::ListArgs),
    /// Show one product
    Show(commands::product::ShowArgs),
    /// Overwrite every field of a product
    Update(commands::product::UpdateArgs),
    /// Delete a product
    Delete(commands::product::DeleteArgs),
    /// Import products from a JSON file of labeled records
    Import(commands::import::ImportArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.log {
        Some(LogFormat::Pretty) => init(Profile::Pretty),
        Some(LogFormat::Json) => init(Profile::Json),
        None => {}
    }

    let result = ProductStore::open(&cli.db, &cli.table)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        .and_then(|store| match cli.command {
            Commands::Init => commands::product::execute_init(&store),
            Commands::Add(args) => commands::product::execute_add(&store, args),
            Commands::List(args) => commands::product::execute_list(&store, args),
            Commands::Show(args) => commands::product::execute_show(&store, args),
            Commands::Update(args) => commands::product::execute_update(&store, args),
            Commands::Delete(args) => commands::product::execute_delete(&store, args),
            Commands::Import(args) => commands::import::execute(&store, args),
        });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
