//! Error types for the scope authorizer

use thiserror::Error;

use crate::scope::ScopeError;

/// Authorization errors
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Requested scope is not `type:name:actions`
    #[error("Invalid scope: {0}")]
    InvalidScope(#[from] ScopeError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;
