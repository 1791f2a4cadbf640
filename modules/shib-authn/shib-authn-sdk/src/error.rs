//! Error types for the Shibboleth `AuthN` adapters.

use thiserror::Error;

/// Errors raised while constructing an adapter.
///
/// Authentication outcomes are never errors; these only signal caller misuse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthNError {
    /// The adapter configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A numeric failure code outside the known set.
    #[error("unknown failure code: {0}")]
    UnknownFailureCode(i64),
}

impl AuthNError {
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
