//! Raw file handles and size formatting

use std::sync::Arc;

/// Media type strings understood by the pipeline.
pub mod media_types {
    pub const PDF: &str = "application/pdf";
    pub const PLAIN_TEXT: &str = "text/plain";
    pub const MS_WORD: &str = "application/msword";
    pub const WORD_DOCX: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
    pub const OCTET_STREAM: &str = "application/octet-stream";

    /// The document types accepted for upload.
    pub const DOCUMENTS: [&str; 4] = [PDF, PLAIN_TEXT, MS_WORD, WORD_DOCX];

    /// Whether the declared type denotes an image (previewable).
    pub fn is_image(media_type: &str) -> bool {
        media_type.starts_with("image/")
    }
}

/// A user-selected file: name, declared media type and binary content.
///
/// Content is shared, so cloning a `RawFile` never copies the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    name: String,
    media_type: String,
    content: Arc<[u8]>,
}

impl RawFile {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        content: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            content: content.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn is_image(&self) -> bool {
        media_types::is_image(&self.media_type)
    }
}

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable byte count, e.g. `0 Bytes`, `1 KB`, `1.5 MB`.
///
/// Uses binary (1024) steps, rounds to two decimals and caps the unit at GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero_and_unit_boundaries() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn caps_unit_at_gigabytes() {
        assert_eq!(format_file_size(2048 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn formatting_is_monotonic_in_byte_count() {
        fn to_bytes(label: &str) -> f64 {
            let (number, unit) = label.split_once(' ').unwrap();
            let power = SIZE_UNITS.iter().position(|u| *u == unit).unwrap();
            number.parse::<f64>().unwrap() * 1024f64.powi(power as i32)
        }

        let samples = [
            0u64, 1, 500, 1023, 1024, 1025, 4096, 1_048_575, 1_048_576, 5_000_000,
            1_073_741_824, 9_999_999_999,
        ];
        for pair in samples.windows(2) {
            assert!(to_bytes(&format_file_size(pair[0])) <= to_bytes(&format_file_size(pair[1])));
        }
    }

    #[test]
    fn image_detection_uses_declared_type() {
        let png = RawFile::new("a.png", "image/png", vec![1u8, 2, 3]);
        let pdf = RawFile::new("a.pdf", media_types::PDF, vec![1u8]);
        assert!(png.is_image());
        assert!(!pdf.is_image());
        assert_eq!(png.size(), 3);
    }
}
