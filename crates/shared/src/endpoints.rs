//! Endpoint paths, relative to the configured service base URL.

pub const VERIFY: &str = "/verify";
pub const LOGIN: &str = "/login";
pub const SIGNUP: &str = "/signup";
pub const UPLOAD: &str = "/upload";

/// Multipart field carrying the document in an upload.
pub const UPLOAD_FIELD: &str = "file";

pub fn generate_summary(saved_as: &str) -> String {
    format!("/generate_summary/{}", saved_as)
}

pub fn generate_flashcards(saved_as: &str) -> String {
    format!("/generate_flashcards/{}", saved_as)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_paths_embed_saved_as() {
        assert_eq!(generate_summary("ab12.pdf"), "/generate_summary/ab12.pdf");
        assert_eq!(
            generate_flashcards("ab12.pdf"),
            "/generate_flashcards/ab12.pdf"
        );
    }
}
