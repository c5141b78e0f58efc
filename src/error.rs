//! Error types for gqlb

use thiserror::Error;

/// Errors raised while assembling or rendering a query
#[derive(Error, Debug)]
pub enum QueryError {
    /// Node or alias name is empty
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Selector does not denote a direct property access
    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Selector refers to a property that does not belong to the queried type
    #[error("Selector `{selector}` refers to a property of `{declaring}`, which is not assignable from `{owner}`")]
    OwnerTypeMismatch {
        selector: String,
        owner: &'static str,
        declaring: &'static str,
    },

    /// Typed bag read found a value of another kind
    #[error("Property `{key}` holds {actual}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// An absent value reached the value formatter
    #[error("Argument value is required")]
    ArgumentValueRequired,

    /// Value has no textual form in the query language
    #[error("Unsupported value kind: {0}")]
    UnsupportedValueKind(String),

    /// Builder configuration could not be read
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Request body could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl QueryError {
    pub fn invalid_name(message: impl Into<String>) -> Self {
        Self::InvalidName(message.into())
    }

    pub fn invalid_selector(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported_value(kind: impl Into<String>) -> Self {
        Self::UnsupportedValueKind(kind.into())
    }
}

/// Result type for builder operations
pub type QueryResult<T> = Result<T, QueryError>;
