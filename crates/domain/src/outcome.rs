use serde::{Deserialize, Serialize};

use crate::ids::SavedAs;

/// Result of uploading one file within a submit batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum UploadOutcome {
    Pending,
    Succeeded(SavedAs),
    Failed(String),
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Succeeded(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, UploadOutcome::Failed(_))
    }

    pub fn saved_as(&self) -> Option<&SavedAs> {
        match self {
            UploadOutcome::Succeeded(saved_as) => Some(saved_as),
            _ => None,
        }
    }
}
