//! Document service port - the HTTP contract consumed by the client

use async_trait::async_trait;
use studydeck_domain::{Flashcard, RawFile, SavedAs};
use studydeck_shared::{LoginRequest, LoginResponse, SignupResponse, UploadResponse};
use thiserror::Error;

/// Failures talking to the document service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Connection-level failure (DNS, refused, reset)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status, with the body's `error` text when present
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("no details"))]
    Status { status: u16, message: Option<String> },

    /// Success status but the body carried an `error` field
    #[error("Server error: {0}")]
    Server(String),

    /// Response body did not match the contract
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The request could not be built (bad URL, unreadable body)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Error text supplied by the service itself, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server(message) => Some(message),
            ApiError::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// Error text from the transport layer, if any.
    pub fn transport_message(&self) -> Option<String> {
        match self {
            ApiError::Timeout => Some(self.to_string()),
            ApiError::Network(message) if !message.is_empty() => Some(self.to_string()),
            ApiError::Status { message: None, .. } => Some(self.to_string()),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Typed access to the document service endpoints.
///
/// Implementations must be credential-bearing: session cookies and the stored
/// access token accompany every request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentApiPort: Send + Sync {
    /// `GET /verify` - Ok only for HTTP 200
    async fn verify_session(&self) -> Result<(), ApiError>;

    /// `POST /login`
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    /// `POST /signup`
    async fn signup(&self, request: &LoginRequest) -> Result<SignupResponse, ApiError>;

    /// `POST /upload` with the file as multipart field `file`
    async fn upload(&self, file: &RawFile) -> Result<UploadResponse, ApiError>;

    /// `GET /generate_summary/{saved_as}`
    async fn generate_summary(&self, saved_as: &SavedAs) -> Result<String, ApiError>;

    /// `GET /generate_flashcards/{saved_as}`
    async fn generate_flashcards(&self, saved_as: &SavedAs) -> Result<Vec<Flashcard>, ApiError>;
}
