//! Application layer
//!
//! Services that drive the intake pipeline: file intake, batch upload,
//! artifact fetching, the session gate, and account actions. They depend on
//! the outbound ports only.

pub mod error;
pub mod services;
pub mod state;
pub mod workspace;

pub use error::{IntakeError, LoginError, SignupError, SubmitError};
pub use workspace::Workspace;
