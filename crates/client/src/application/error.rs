//! Application error types
//!
//! Every variant renders as the message shown to the user.

use thiserror::Error;

/// Intake store refusals. The store is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("You can only upload up to {max} files")]
    CountExceeded { max: usize, attempted: usize },

    #[error("Files cannot be changed while an upload is in progress")]
    Busy,
}

/// Submit refusals. No request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please select at least one file")]
    EmptySelection,

    #[error("An upload is already in progress")]
    AlreadyRunning,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Request timed out. Please try again.")]
    Timeout,

    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The service explained the refusal itself
    #[error("{0}")]
    Rejected(String),

    #[error("Network error. Please check your connection and try again.")]
    Network,

    #[error("Invalid response from server")]
    InvalidResponse,

    #[error("An unexpected error occurred")]
    Unexpected,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("{0}")]
    Rejected(String),

    #[error("Signup failed")]
    Failed,
}
