//! Response bodies
//!
//! The service reports failures as `{ "error": "..." }`, sometimes with a
//! 200 status. `ServerReply` tries the error shape first so such bodies are
//! never mistaken for an empty success.

use serde::{Deserialize, Serialize};
use studydeck_domain::Flashcard;

/// `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Either an error body or the expected payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ServerReply<T> {
    Error(ErrorResponse),
    Ok(T),
}

impl<T> ServerReply<T> {
    pub fn into_result(self) -> Result<T, String> {
        match self {
            ServerReply::Ok(value) => Ok(value),
            ServerReply::Error(ErrorResponse { error }) => Err(error),
        }
    }
}

/// Reply of `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub file_id: String,
    pub filename: String,
    /// Identifier used for every downstream artifact request
    pub saved_as: String,
    #[serde(default)]
    pub success: Option<String>,
}

/// Reply of `GET /generate_summary/{saved_as}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// Reply of `GET /generate_flashcards/{saved_as}`.
///
/// A missing or null list is treated as an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardsResponse {
    #[serde(default)]
    pub flashcards: Option<Vec<Flashcard>>,
}

impl FlashcardsResponse {
    pub fn into_cards(self) -> Vec<Flashcard> {
        self.flashcards.unwrap_or_default()
    }
}

/// Reply of `POST /login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Reply of `POST /signup`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_wins_over_lenient_payload() {
        let reply: ServerReply<FlashcardsResponse> =
            serde_json::from_str(r#"{"error": "File not found"}"#).unwrap();
        assert_eq!(reply.into_result(), Err("File not found".to_string()));
    }

    #[test]
    fn upload_reply_parses_full_contract() {
        let body = r#"{
            "success": "File Uploaded",
            "file_id": "9c1e",
            "filename": "notes.pdf",
            "saved_as": "9c1e.pdf"
        }"#;
        let reply: ServerReply<UploadResponse> = serde_json::from_str(body).unwrap();
        let upload = reply.into_result().unwrap();
        assert_eq!(upload.saved_as, "9c1e.pdf");
        assert_eq!(upload.success.as_deref(), Some("File Uploaded"));
    }

    #[test]
    fn null_flashcards_become_empty_set() {
        let reply: ServerReply<FlashcardsResponse> =
            serde_json::from_str(r#"{"flashcards": null}"#).unwrap();
        assert!(reply.into_result().unwrap().into_cards().is_empty());
    }

    #[test]
    fn flashcards_keep_order() {
        let body = r#"{"flashcards": [
            {"question": "Q1", "answer": "A1"},
            {"question": "Q2", "answer": "A2"}
        ]}"#;
        let reply: ServerReply<FlashcardsResponse> = serde_json::from_str(body).unwrap();
        let cards = reply.into_result().unwrap().into_cards();
        assert_eq!(cards[0], Flashcard::new("Q1", "A1"));
        assert_eq!(cards[1].question, "Q2");
    }
}
