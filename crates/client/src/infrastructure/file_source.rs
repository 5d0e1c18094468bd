//! Reads local files into [`RawFile`]s.
//!
//! The media type is declared from the file extension, the way a browser file
//! picker reports it.

use std::io;
use std::path::{Path, PathBuf};

use studydeck_domain::{media_types, RawFile};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileSourceError {
    #[error("{path} has no file name")]
    NoFileName { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub async fn load_raw_file(path: impl AsRef<Path>) -> Result<RawFile, FileSourceError> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| FileSourceError::NoFileName {
            path: path.to_path_buf(),
        })?
        .to_string();

    let content = tokio::fs::read(path)
        .await
        .map_err(|source| FileSourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let media_type = media_type_for(path);
    tracing::debug!(file = %name, media_type, bytes = content.len(), "Loaded file");
    Ok(RawFile::new(name, media_type, content))
}

pub fn media_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => media_types::PDF,
        Some("txt") => media_types::PLAIN_TEXT,
        Some("doc") => media_types::MS_WORD,
        Some("docx") => media_types::WORD_DOCX,
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => media_types::OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_follows_extension() {
        assert_eq!(media_type_for(Path::new("a/Report.PDF")), media_types::PDF);
        assert_eq!(media_type_for(Path::new("notes.txt")), media_types::PLAIN_TEXT);
        assert_eq!(media_type_for(Path::new("old.doc")), media_types::MS_WORD);
        assert_eq!(media_type_for(Path::new("new.docx")), media_types::WORD_DOCX);
        assert_eq!(media_type_for(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("README")), media_types::OCTET_STREAM);
    }

    #[tokio::test]
    async fn loads_content_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lecture.txt");
        std::fs::write(&path, "photosynthesis").unwrap();

        let file = load_raw_file(&path).await.unwrap();

        assert_eq!(file.name(), "lecture.txt");
        assert_eq!(file.media_type(), media_types::PLAIN_TEXT);
        assert_eq!(file.content(), b"photosynthesis");
        assert_eq!(file.size(), 14);
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_raw_file(dir.path().join("absent.pdf")).await.unwrap_err();
        assert!(matches!(err, FileSourceError::Read { .. }));
    }
}
