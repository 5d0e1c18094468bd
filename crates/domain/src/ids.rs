use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier assigned to an accepted file by the intake store.
///
/// Issued from a per-store counter, so it stays unique for the lifetime of
/// the store even after entries are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FileId(u64);

impl FileId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for FileId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Server-assigned name of an uploaded document (`saved_as` in the upload reply).
///
/// Opaque to the client; it keys every derived-artifact request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedAs(String);

impl SavedAs {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("saved_as cannot be empty"));
        }
        if trimmed.contains('/') {
            return Err(DomainError::InvalidId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SavedAs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SavedAs {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
