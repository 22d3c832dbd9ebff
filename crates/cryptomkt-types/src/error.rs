//! Error types for wire-level parsing

use thiserror::Error;

/// Errors produced when parsing exchange values from strings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// String does not name any member of the enum
    #[error("Unknown {kind} value: {value:?}")]
    UnknownVariant {
        /// Enum being parsed (e.g. "Market")
        kind: &'static str,
        /// The rejected input
        value: String,
    },

    /// Timestamp matched none of the supported formats
    #[error("Unsupported timestamp format: {0:?}")]
    InvalidTimestamp(String),
}

impl TypesError {
    /// Create an unknown variant error
    pub fn unknown_variant(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}

/// Result type alias for parsing operations
pub type TypesResult<T> = Result<T, TypesError>;
