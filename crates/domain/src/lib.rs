//! StudyDeck Domain
//!
//! Pure vocabulary for the document intake pipeline: uploaded files and their
//! validation rules, per-file upload outcomes, derived artifacts (summaries and
//! flashcards), and the session gate state. Nothing in this crate performs I/O.

pub mod artifact;
pub mod auth;
pub mod error;
pub mod error_board;
pub mod file;
pub mod ids;
pub mod outcome;
pub mod validation;

pub use artifact::{ArtifactKind, DerivedArtifact, Flashcard, FlashcardDeck};
pub use auth::AuthState;
pub use error::DomainError;
pub use error_board::ErrorBoard;
pub use file::{format_file_size, media_types, RawFile};
pub use ids::{FileId, SavedAs};
pub use outcome::UploadOutcome;
pub use validation::{validate, FileRejection, UploadRules};
