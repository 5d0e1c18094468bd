//! StudyDeck Client - document intake pipeline
//!
//! Uploads documents to the StudyDeck service and retrieves the summaries and
//! flashcards it generates, behind a session check.
//!
//! ## Layers
//!
//! - `ports`: traits for the document service and the host platform
//! - `application`: intake store, upload orchestrator, result fetcher,
//!   session gate and account actions
//! - `infrastructure`: reqwest adapter, desktop platform, configuration
//! - `routes`: navigable views and which are guarded

pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod routes;

pub use application::services::{
    AccountService, AuthGate, FetchState, IntakeStore, ResultFetcher, SubmitReport,
    UploadOrchestrator,
};
pub use application::Workspace;
pub use routes::Route;
