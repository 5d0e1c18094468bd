//! File validation rules applied before a file may enter the intake store.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::file::{media_types, RawFile};

const MIB: u64 = 1024 * 1024;

/// Why a candidate file was refused.
///
/// The `Display` text is the user-facing message shown next to the file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileRejection {
    #[error("{name}: File must be under {} MB", format_megabytes(*max_size_bytes))]
    SizeExceeded { name: String, max_size_bytes: u64 },

    #[error("{name}: Invalid file type")]
    UnsupportedType { name: String, media_type: String },
}

/// Upload limits injected at each call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRules {
    pub max_file_size: u64,
    pub allowed_types: BTreeSet<String>,
    pub max_files: usize,
}

impl UploadRules {
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * MIB;
    pub const DEFAULT_MAX_FILES: usize = 1;

    pub fn new<I, S>(max_file_size: u64, allowed_types: I, max_files: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            max_file_size,
            allowed_types: allowed_types.into_iter().map(Into::into).collect(),
            max_files,
        }
    }

    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn with_allowed_type(mut self, media_type: impl Into<String>) -> Self {
        self.allowed_types.insert(media_type.into());
        self
    }
}

impl Default for UploadRules {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MAX_FILE_SIZE,
            media_types::DOCUMENTS,
            Self::DEFAULT_MAX_FILES,
        )
    }
}

/// Check a file against size and type limits.
///
/// Size is checked first; the type must match an allowed entry exactly.
pub fn validate(
    file: &RawFile,
    max_size_bytes: u64,
    allowed_types: &BTreeSet<String>,
) -> Result<(), FileRejection> {
    if file.size() > max_size_bytes {
        return Err(FileRejection::SizeExceeded {
            name: file.name().to_string(),
            max_size_bytes,
        });
    }
    if !allowed_types.contains(file.media_type()) {
        return Err(FileRejection::UnsupportedType {
            name: file.name().to_string(),
            media_type: file.media_type().to_string(),
        });
    }
    Ok(())
}

fn format_megabytes(bytes: u64) -> String {
    if bytes % MIB == 0 {
        (bytes / MIB).to_string()
    } else {
        let mb = bytes as f64 / MIB as f64;
        format!("{}", (mb * 100.0).round() / 100.0)
    }
}
