//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema loading error.
    #[error("schema load error: {0}")]
    Load(#[from] wirebuilder_schema::LoadError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },

    /// Unknown type reference.
    #[error("unknown type '{type_name}' in field '{field}'")]
    UnknownType {
        /// Type name.
        type_name: String,
        /// Field name.
        field: String,
    },

    /// Byte width with no fixed-width primitive.
    #[error("unsupported byte width {width}")]
    UnsupportedWidth {
        /// Requested width.
        width: usize,
    },

    /// Runtime size field whose suffix is neither `Size` nor `Count`.
    #[error("size '{size}' of field '{field}' ends in neither 'Size' nor 'Count'")]
    AmbiguousSizeSuffix {
        /// Field name.
        field: String,
        /// Size field name.
        size: String,
    },

    /// Runtime size field that cannot be found in the owning struct.
    #[error("size '{size}' of field '{owner}.{field}' does not name a reachable field")]
    UnresolvedSizeReference {
        /// Owning struct.
        owner: String,
        /// Field name.
        field: String,
        /// Size field name.
        size: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates an unknown type error.
    pub fn unknown_type(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
            field: field.into(),
        }
    }
}
