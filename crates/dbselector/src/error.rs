//! Error types for dbselector

use thiserror::Error;

/// Result type alias for dbselector operations
pub type SelectorResult<T> = Result<T, SelectorError>;

/// Errors produced while rendering a statement.
///
/// Builder methods never fail; only rendering (row mapping), grammar
/// validation and JSON value conversion can.
#[derive(Debug, Error)]
pub enum SelectorError {
    /// A row value could not be mapped to columns for INSERT
    #[error("Mapping error for '{type_name}': {message}")]
    Mapping { type_name: String, message: String },

    /// Clause list violates WHERE/bracket grammar (only from `validate`)
    #[error("Grammar error: {0}")]
    Grammar(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SelectorError {
    /// Create a mapping error for a specific row type
    pub fn mapping(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Mapping {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create a grammar error
    pub fn grammar(message: impl Into<String>) -> Self {
        Self::Grammar(message.into())
    }

    /// Check if this is a mapping error
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping { .. })
    }

    /// Check if this is a grammar error
    pub fn is_grammar(&self) -> bool {
        matches!(self, Self::Grammar(_))
    }
}

impl From<serde_json::Error> for SelectorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
