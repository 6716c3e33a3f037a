//! Error types for schema loading.

use thiserror::Error;

/// Error type for schema loading operations.
#[derive(Debug, Error)]
pub enum LoadError {
    /// YAML decoding error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Top-level type kind is not `byte`, `enum` or `struct`.
    #[error("unknown kind '{kind}' for type '{type_name}'")]
    UnknownKind {
        /// Type name.
        type_name: String,
        /// Kind as written.
        kind: String,
    },

    /// Missing required field.
    #[error("missing required field '{field}' on '{context}'")]
    MissingField {
        /// Type or attribute the field belongs to.
        context: String,
        /// Field name.
        field: String,
    },

    /// Size is neither a non-negative integer nor a field name.
    #[error("invalid size '{value}' on '{context}'")]
    InvalidSize {
        /// Type or attribute the size belongs to.
        context: String,
        /// Size as written.
        value: String,
    },

    /// Disposition is neither `inline` nor `const`.
    #[error("unknown disposition '{disposition}' on attribute '{attribute}'")]
    UnknownDisposition {
        /// Attribute name.
        attribute: String,
        /// Disposition as written.
        disposition: String,
    },

    /// Invalid field value.
    #[error("invalid value '{value}' for '{field}' on '{context}'")]
    InvalidValue {
        /// Type or attribute the field belongs to.
        context: String,
        /// Field name.
        field: String,
        /// Value as written.
        value: String,
    },
}

impl LoadError {
    /// Creates a missing field error.
    pub fn missing_field(context: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            context: context.into(),
            field: field.into(),
        }
    }

    /// Creates an invalid size error.
    pub fn invalid_size(context: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidSize {
            context: context.into(),
            value: value.into(),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(
        context: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            context: context.into(),
            field: field.into(),
            value: value.into(),
        }
    }
}
