use std::fmt;
use std::str::FromStr;

use crate::errors::{EstoqueError, Result};

/// Name of the table products are stored in
///
/// Table names are spliced into SQL text (they cannot be bound as
/// parameters), so only plain identifiers are accepted: an ASCII letter or
/// underscore followed by ASCII letters, digits or underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    /// Longest accepted name
    pub const MAX_LEN: usize = 64;

    /// Table used when the caller names none
    pub const DEFAULT: &'static str = "products";

    /// Validate and wrap a table name
    pub fn parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let invalid = |reason: &str| EstoqueError::InvalidTableName {
            name: name.clone(),
            reason: reason.to_string(),
        };

        let mut chars = name.chars();
        match chars.next() {
            None => return Err(invalid("name is empty")),
            Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
                return Err(invalid("must start with a letter or underscore"))
            }
            Some(_) => {}
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("only letters, digits and underscores are allowed"));
        }
        if name.len() > Self::MAX_LEN {
            return Err(invalid("name is too long"));
        }
        if name.to_ascii_lowercase().starts_with("sqlite_") {
            return Err(invalid("names beginning with sqlite_ are reserved"));
        }

        Ok(Self(name))
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TableName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TableName {
    type Err = EstoqueError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_accepts_plain_identifiers() {
        for name in ["products", "produtos", "_stock", "inv_2024", "A"] {
            assert_eq!(TableName::parse(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn test_rejects_injection() {
        let err = TableName::parse("products; DROP TABLE products").unwrap_err();
        assert!(matches!(err, EstoqueError::InvalidTableName { .. }));
    }

    #[test]
    fn test_rejects_empty_and_leading_digit() {
        assert!(TableName::parse("").is_err());
        assert!(TableName::parse("1products").is_err());
    }

    #[test]
    fn test_rejects_reserved_prefix() {
        assert!(TableName::parse("sqlite_master").is_err());
        assert!(TableName::parse("SQLITE_products").is_err());
    }

    #[test]
    fn test_default_is_products() {
        assert_eq!(TableName::default().as_str(), "products");
    }

    proptest! {
        #[test]
        fn prop_identifiers_accepted(name in "[a-rt-zA-RT-Z_][A-Za-z0-9_]{0,63}") {
            prop_assert!(TableName::parse(name.clone()).is_ok());
        }

        #[test]
        fn prop_names_with_other_chars_rejected(
            prefix in "[a-z]{1,10}",
            bad in "[ .;'\"()\\-]",
            suffix in "[a-z]{0,10}",
        ) {
            let name = format!("{prefix}{bad}{suffix}");
            prop_assert!(TableName::parse(name).is_err());
        }
    }
}
