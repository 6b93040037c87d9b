//! Error types for SQL compilation.

use thiserror::Error;

/// Errors returned while compiling a statement.
///
/// Compilation is all-or-nothing: when any of these is returned, no SQL text
/// is produced for the statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlError {
    /// The requested dialect was never registered.
    #[error("dialect not found: {0}")]
    DialectNotFound(String),

    /// A clause or operator is present but the dialect does not support it.
    #[error("{feature} is not supported by the {dialect} dialect")]
    UnsupportedFeature {
        /// The offending clause or operator, e.g. `RETURNING`.
        feature: String,
        /// The dialect name.
        dialect: String,
    },

    /// Malformed input to the expression model.
    #[error("invalid expression: {0}")]
    InvalidExpression(String),

    /// A character needs escaping but the dialect has no escape sequence for it.
    #[error("character {ch:?} cannot be escaped by the {dialect} dialect")]
    Escape {
        /// The character.
        ch: char,
        /// The dialect name.
        dialect: String,
    },

    /// The dialect options themselves are inconsistent.
    #[error("invalid dialect configuration for {dialect}: {reason}")]
    InvalidDialect {
        /// The dialect name.
        dialect: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl SqlError {
    /// Creates an [`SqlError::UnsupportedFeature`].
    #[must_use]
    pub fn unsupported(feature: impl Into<String>, dialect: impl Into<String>) -> Self {
        Self::UnsupportedFeature {
            feature: feature.into(),
            dialect: dialect.into(),
        }
    }

    /// Creates an [`SqlError::InvalidExpression`].
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidExpression(reason.into())
    }
}

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, SqlError>;
