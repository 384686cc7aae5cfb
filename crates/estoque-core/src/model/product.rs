use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{EstoqueError, Result};

/// Field map keyed by the logical labels of [`ProductField`]
pub type LabeledFields = serde_json::Map<String, Value>;

/// Name of the primary key column
pub const ID_COLUMN: &str = "id";

/// The non-id fields of a product, in the order they are bound to statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Name,
    Quantity,
    PurchasePrice,
    Image,
    TagColor,
    MinimumStock,
    PurchaseDate,
    Description,
}

impl ProductField {
    /// All fields in column/bind order
    pub const ALL: [ProductField; 8] = [
        ProductField::Name,
        ProductField::Quantity,
        ProductField::PurchasePrice,
        ProductField::Image,
        ProductField::TagColor,
        ProductField::MinimumStock,
        ProductField::PurchaseDate,
        ProductField::Description,
    ];

    /// Logical label used by labeled field maps
    pub fn label(self) -> &'static str {
        match self {
            ProductField::Name => "Name",
            ProductField::Quantity => "Quantity",
            ProductField::PurchasePrice => "Purchase Price",
            ProductField::Image => "Image",
            ProductField::TagColor => "Tag Color",
            ProductField::MinimumStock => "Minimum Stock",
            ProductField::PurchaseDate => "Purchase Date",
            ProductField::Description => "Description",
        }
    }

    /// Column name in the products table
    pub fn column(self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::Quantity => "quantity",
            ProductField::PurchasePrice => "purchase_price",
            ProductField::Image => "image",
            ProductField::TagColor => "tag_color",
            ProductField::MinimumStock => "minimum_stock",
            ProductField::PurchaseDate => "purchase_date",
            ProductField::Description => "description",
        }
    }

    /// Whether the table rejects a row without this field
    pub fn is_required(self) -> bool {
        matches!(
            self,
            ProductField::Name | ProductField::Quantity | ProductField::PurchasePrice
        )
    }

    /// Look up a field by its logical label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }
}

/// Product data without its identifier
///
/// `purchase_date` is kept as the caller's `YYYY-MM-DD` string; the store
/// never parses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub quantity: i64,
    pub purchase_price: f64,
    pub image: Option<String>,
    pub tag_color: Option<String>,
    pub minimum_stock: Option<i64>,
    pub purchase_date: Option<String>,
    pub description: Option<String>,
}

impl ProductFields {
    /// Create fields with the required values set and every optional one empty
    pub fn new(name: impl Into<String>, quantity: i64, purchase_price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            purchase_price,
            image: None,
            tag_color: None,
            minimum_stock: None,
            purchase_date: None,
            description: None,
        }
    }

    /// Convert a labeled field map into typed fields
    ///
    /// Optional labels may be absent or `null`. Labels outside
    /// [`ProductField::ALL`] are rejected.
    pub fn from_labeled(map: &LabeledFields) -> Result<Self> {
        if let Some(label) = map.keys().find(|k| ProductField::from_label(k).is_none()) {
            return Err(EstoqueError::UnknownField {
                label: label.clone(),
            });
        }

        let name = expect_str(ProductField::Name, required(map, ProductField::Name)?)?;
        let quantity = expect_i64(
            ProductField::Quantity,
            required(map, ProductField::Quantity)?,
        )?;
        let purchase_price = expect_f64(
            ProductField::PurchasePrice,
            required(map, ProductField::PurchasePrice)?,
        )?;

        let optional_str = |field: ProductField| -> Result<Option<String>> {
            optional(map, field).map(|v| expect_str(field, v)).transpose()
        };

        Ok(Self {
            name,
            quantity,
            purchase_price,
            image: optional_str(ProductField::Image)?,
            tag_color: optional_str(ProductField::TagColor)?,
            minimum_stock: optional(map, ProductField::MinimumStock)
                .map(|v| expect_i64(ProductField::MinimumStock, v))
                .transpose()?,
            purchase_date: optional_str(ProductField::PurchaseDate)?,
            description: optional_str(ProductField::Description)?,
        })
    }

    /// Convert into a labeled field map carrying every label
    pub fn to_labeled(&self) -> LabeledFields {
        ProductField::ALL
            .into_iter()
            .map(|field| (field.label().to_string(), self.value_of(field)))
            .collect()
    }

    /// JSON value of a single field (`null` for an empty optional)
    pub fn value_of(&self, field: ProductField) -> Value {
        match field {
            ProductField::Name => Value::from(self.name.as_str()),
            ProductField::Quantity => Value::from(self.quantity),
            ProductField::PurchasePrice => Value::from(self.purchase_price),
            ProductField::Image => Value::from(self.image.clone()),
            ProductField::TagColor => Value::from(self.tag_color.clone()),
            ProductField::MinimumStock => Value::from(self.minimum_stock),
            ProductField::PurchaseDate => Value::from(self.purchase_date.clone()),
            ProductField::Description => Value::from(self.description.clone()),
        }
    }
}

/// A stored product row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(flatten)]
    pub fields: ProductFields,
}

impl Product {
    /// True when a minimum stock is set and quantity has dropped below it
    pub fn is_below_minimum(&self) -> bool {
        self.fields
            .minimum_stock
            .is_some_and(|minimum| self.fields.quantity < minimum)
    }
}

fn required(map: &LabeledFields, field: ProductField) -> Result<&Value> {
    match map.get(field.label()) {
        None | Some(Value::Null) => Err(EstoqueError::MissingField {
            label: field.label().to_string(),
        }),
        Some(v) => Ok(v),
    }
}

fn optional(map: &LabeledFields, field: ProductField) -> Option<&Value> {
    match map.get(field.label()) {
        None | Some(Value::Null) => None,
        Some(v) => Some(v),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_error(field: ProductField, expected: &str, value: &Value) -> EstoqueError {
    EstoqueError::InvalidFieldType {
        label: field.label().to_string(),
        expected: expected.to_string(),
        found: json_type(value).to_string(),
    }
}

fn expect_str(field: ProductField, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| type_error(field, "string", value))
}

fn expect_i64(field: ProductField, value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| type_error(field, "integer", value))
}

fn expect_f64(field: ProductField, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| type_error(field, "number", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labeled(value: Value) -> LabeledFields {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_label_lookup_covers_all_fields() {
        for field in ProductField::ALL {
            assert_eq!(ProductField::from_label(field.label()), Some(field));
        }
        assert_eq!(ProductField::from_label("Purchase Price (R$)"), None);
    }

    #[test]
    fn test_only_first_three_fields_required() {
        let required: Vec<_> = ProductField::ALL
            .into_iter()
            .filter(|f| f.is_required())
            .map(ProductField::column)
            .collect();
        assert_eq!(required, vec!["name", "quantity", "purchase_price"]);
    }

    #[test]
    fn test_from_labeled_full_record() {
        let map = labeled(json!({
            "Name": "Widget",
            "Quantity": 10,
            "Purchase Price": 2.5,
            "Image": null,
            "Tag Color": "red",
            "Minimum Stock": 2,
            "Purchase Date": "2024-01-15",
            "Description": "test"
        }));

        let fields = ProductFields::from_labeled(&map).unwrap();

        assert_eq!(fields.name, "Widget");
        assert_eq!(fields.quantity, 10);
        assert_eq!(fields.purchase_price, 2.5);
        assert_eq!(fields.image, None);
        assert_eq!(fields.tag_color.as_deref(), Some("red"));
        assert_eq!(fields.minimum_stock, Some(2));
        assert_eq!(fields.purchase_date.as_deref(), Some("2024-01-15"));
        assert_eq!(fields.description.as_deref(), Some("test"));
    }

    #[test]
    fn test_from_labeled_accepts_integer_price() {
        let map = labeled(json!({"Name": "Bolt", "Quantity": 3, "Purchase Price": 4}));
        let fields = ProductFields::from_labeled(&map).unwrap();
        assert_eq!(fields.purchase_price, 4.0);
    }

    #[test]
    fn test_from_labeled_missing_name() {
        let map = labeled(json!({"Quantity": 1, "Purchase Price": 1.0}));
        let err = ProductFields::from_labeled(&map).unwrap_err();
        assert_eq!(
            err,
            EstoqueError::MissingField {
                label: "Name".to_string()
            }
        );
    }

    #[test]
    fn test_from_labeled_null_required_is_missing() {
        let map = labeled(json!({"Name": null, "Quantity": 1, "Purchase Price": 1.0}));
        assert!(matches!(
            ProductFields::from_labeled(&map),
            Err(EstoqueError::MissingField { .. })
        ));
    }

    #[test]
    fn test_from_labeled_rejects_unknown_label() {
        let map = labeled(json!({
            "Name": "Widget",
            "Quantity": 1,
            "Purchase Price": 1.0,
            "Purchase Price (R$)": 1.0
        }));
        assert_eq!(
            ProductFields::from_labeled(&map).unwrap_err(),
            EstoqueError::UnknownField {
                label: "Purchase Price (R$)".to_string()
            }
        );
    }

    #[test]
    fn test_from_labeled_rejects_fractional_quantity() {
        let map = labeled(json!({"Name": "Widget", "Quantity": 1.5, "Purchase Price": 1.0}));
        assert_eq!(
            ProductFields::from_labeled(&map).unwrap_err(),
            EstoqueError::InvalidFieldType {
                label: "Quantity".to_string(),
                expected: "integer".to_string(),
                found: "number".to_string(),
            }
        );
    }

    #[test]
    fn test_to_labeled_carries_nulls() {
        let fields = ProductFields::new("Widget", 10, 2.5);
        let map = fields.to_labeled();

        assert_eq!(map.len(), 8);
        assert_eq!(map["Name"], json!("Widget"));
        assert_eq!(map["Image"], Value::Null);
        assert_eq!(ProductFields::from_labeled(&map).unwrap(), fields);
    }

    #[test]
    fn test_below_minimum() {
        let mut product = Product {
            id: 1,
            fields: ProductFields::new("Widget", 1, 2.5),
        };
        assert!(!product.is_below_minimum());

        product.fields.minimum_stock = Some(2);
        assert!(product.is_below_minimum());

        product.fields.quantity = 2;
        assert!(!product.is_below_minimum());
    }

    #[test]
    fn test_product_serializes_flat() {
        let product = Product {
            id: 7,
            fields: ProductFields::new("Widget", 10, 2.5),
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["id"], json!(7));
        assert_eq!(value["name"], json!("Widget"));
        assert_eq!(value["minimum_stock"], Value::Null);
    }
}
