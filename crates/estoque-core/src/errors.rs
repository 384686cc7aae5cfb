use thiserror::Error;

/// Result type alias using EstoqueError
pub type Result<T> = std::result::Result<T, EstoqueError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every error raised by the product store is classified into one of these
/// kinds. Each kind maps to a stable error code usable by callers and tests
/// without string-matching messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    MissingField,
    UnknownField,
    InvalidFieldType,

    // Integration
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::UnknownField => "ERR_UNKNOWN_FIELD",
            ExErrorKind::InvalidFieldType => "ERR_INVALID_FIELD_TYPE",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional context (operation, entity id,
/// table) for programmatic handling and debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    table: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            table: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add table context
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the table context, if any
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// True when the error reports a missing row
    pub fn is_not_found(&self) -> bool {
        self.kind == ExErrorKind::NotFound
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(table) = &self.table {
            write!(f, " (table: {})", table)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain errors for product records and their inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstoqueError {
    /// No product row carries the given id
    #[error("Product not found: {id}")]
    ProductNotFound { id: i64 },

    /// Table name is not a plain SQL identifier
    #[error("Invalid table name {name:?}: {reason}")]
    InvalidTableName { name: String, reason: String },

    /// A required label is absent from a labeled field map
    #[error("Missing required field: {label}")]
    MissingField { label: String },

    /// A labeled field map contains a label no product field answers to
    #[error("Unknown field: {label}")]
    UnknownField { label: String },

    /// A labeled value has the wrong JSON type for its field
    #[error("Field {label} expects {expected}, got {found}")]
    InvalidFieldType {
        label: String,
        expected: String,
        found: String,
    },
}

impl From<EstoqueError> for ExError {
    fn from(err: EstoqueError) -> Self {
        let message = err.to_string();
        match err {
            EstoqueError::ProductNotFound { id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(id.to_string())
                .with_message(message),

            EstoqueError::InvalidTableName { name, .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_table(name)
                .with_message(message),

            EstoqueError::MissingField { .. } => {
                ExError::new(ExErrorKind::MissingField).with_message(message)
            }

            EstoqueError::UnknownField { .. } => {
                ExError::new(ExErrorKind::UnknownField).with_message(message)
            }

            EstoqueError::InvalidFieldType { .. } => {
                ExError::new(ExErrorKind::InvalidFieldType).with_message(message)
            }
        }
    }
}
