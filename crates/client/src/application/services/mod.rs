//! Application services

pub mod account_service;
pub mod artifact_service;
pub mod auth_gate;
pub mod intake_service;
pub mod upload_service;

pub use account_service::{AccountService, LockNotice};
pub use artifact_service::{FetchState, ResultFetcher};
pub use auth_gate::AuthGate;
pub use intake_service::{IntakeEntryView, IntakeStore, PreviewHandle};
pub use upload_service::{FileReport, SubmitReport, UploadOrchestrator};
