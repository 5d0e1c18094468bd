//! StudyDeck Shared - Wire contract between the client and the document service
//!
//! This crate contains:
//! - Request/response DTOs for every endpoint the client calls
//! - Endpoint path builders
//! - `ServerReply`, which recognises `{ "error": ... }` bodies the service
//!   may return with any status code
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and serde_json
//! 2. **No business logic** - Pure data types and serialization

pub mod endpoints;
pub mod requests;
pub mod responses;

pub use requests::LoginRequest;
pub use responses::{
    ErrorResponse, FlashcardsResponse, LoginResponse, ServerReply, SignupResponse,
    SummaryResponse, UploadResponse,
};
