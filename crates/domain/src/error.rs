//! Unified error type for the domain layer

use thiserror::Error;

/// Errors raised when a domain value cannot be constructed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., empty field)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid identifier format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
