//! Product commands
//!
//! Usage:
//!   estoque init
//!   estoque add --name <NAME> --quantity <N> --purchase-price <PRICE> [options]
//!   estoque list [--json]
//!   estoque show <ID> [--json]
//!   estoque update <ID> --name <NAME> --quantity <N> --purchase-price <PRICE> [options]
//!   estoque delete <ID>

use super::CommandResult;
use chrono::NaiveDate;
use clap::Args;
use estoque_core::model::{Product, ProductFields};
use estoque_store::ProductStore;

/// Date format accepted for `--purchase-date` and stored in the table
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product name
    #[arg(long)]
    pub name: String,

    /// Units in stock
    #[arg(long)]
    pub quantity: i64,

    /// Unit purchase price
    #[arg(long)]
    pub purchase_price: f64,

    /// Image path or reference
    #[arg(long)]
    pub image: Option<String>,

    /// Tag color
    #[arg(long)]
    pub tag_color: Option<String>,

    /// Quantity below which the product is flagged in listings
    #[arg(long)]
    pub minimum_stock: Option<i64>,

    /// Purchase date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub purchase_date: Option<NaiveDate>,

    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,
}

impl From<ProductArgs> for ProductFields {
    fn from(args: ProductArgs) -> Self {
        ProductFields {
            name: args.name,
            quantity: args.quantity,
            purchase_price: args.purchase_price,
            image: args.image,
            tag_color: args.tag_color,
            minimum_stock: args.minimum_stock,
            purchase_date: args
                .purchase_date
                .map(|d| d.format(DATE_FORMAT).to_string()),
            description: args.description,
        }
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Print products as a JSON array
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Product ID
    pub id: i64,

    /// Print the product as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Product ID
    pub id: i64,

    #[command(flatten)]
    pub fields: ProductArgs,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Product ID
    pub id: i64,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD, got {:?}: {}", value, e))
}

/// Execute init command
pub fn execute_init(store: &ProductStore) -> CommandResult {
    store.ensure_schema()?;
    println!("✓ Table '{}' ready", store.table());
    Ok(())
}

/// Execute add command
pub fn execute_add(store: &ProductStore, args: ProductArgs) -> CommandResult {
    let id = store.insert(&args.into())?;
    println!("✓ Added product {}", id);
    Ok(())
}

/// Execute list command
pub fn execute_list(store: &ProductStore, args: ListArgs) -> CommandResult {
    let listing = store.list_all()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing.products)?);
        return Ok(());
    }

    println!(
        "{:>4}  {:<24} {:>8} {:>10} {:>8}  {:<10}  {}",
        "ID", "NAME", "QTY", "PRICE", "MIN", "PURCHASED", "TAG"
    );
    for product in &listing.products {
        println!("{}", format_row(product));
    }

    let low = listing.below_minimum().count();
    println!("{} product(s), {} below minimum stock", listing.products.len(), low);
    Ok(())
}

/// Execute show command
pub fn execute_show(store: &ProductStore, args: ShowArgs) -> CommandResult {
    let product = store
        .get_by_id(args.id)?
        .ok_or_else(|| format!("product {} not found", args.id))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&product)?);
        return Ok(());
    }

    let fields = &product.fields;
    println!("id:             {}", product.id);
    println!("name:           {}", fields.name);
    println!("quantity:       {}", fields.quantity);
    println!("purchase price: {:.2}", fields.purchase_price);
    println!("image:          {}", or_dash(&fields.image));
    println!("tag color:      {}", or_dash(&fields.tag_color));
    println!(
        "minimum stock:  {}",
        fields
            .minimum_stock
            .map_or_else(|| "-".to_string(), |m| m.to_string())
    );
    println!("purchase date:  {}", or_dash(&fields.purchase_date));
    println!("description:    {}", or_dash(&fields.description));
    if product.is_below_minimum() {
        println!("! below minimum stock");
    }
    Ok(())
}

/// Execute update command
pub fn execute_update(store: &ProductStore, args: UpdateArgs) -> CommandResult {
    store.update(args.id, &args.fields.into())?;
    println!("✓ Updated product {}", args.id);
    Ok(())
}

/// Execute delete command
pub fn execute_delete(store: &ProductStore, args: DeleteArgs) -> CommandResult {
    store.delete(args.id)?;
    println!("✓ Deleted product {}", args.id);
    Ok(())
}

fn format_row(product: &Product) -> String {
    let fields = &product.fields;
    let flag = if product.is_below_minimum() { " !" } else { "" };
    format!(
        "{:>4}  {:<24} {:>8} {:>10.2} {:>8}  {:<10}  {}{}",
        product.id,
        fields.name,
        fields.quantity,
        fields.purchase_price,
        fields
            .minimum_stock
            .map_or_else(|| "-".to_string(), |m| m.to_string()),
        or_dash(&fields.purchase_date),
        or_dash(&fields.tag_color),
        flag
    )
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_iso_day() {
        let date = parse_date("2024-01-15").unwrap();
        assert_eq!(date.format(DATE_FORMAT).to_string(), "2024-01-15");
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        assert!(parse_date("15/01/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_format_row_flags_low_stock() {
        let mut fields = ProductFields::new("Widget", 1, 2.5);
        fields.minimum_stock = Some(2);
        let row = format_row(&Product { id: 3, fields });

        assert!(row.contains("Widget"));
        assert!(row.contains("2.50"));
        assert!(row.ends_with(" !"));
    }
}
