//! Document service fake whose replies are released by the test.
//!
//! Each gated call waits on a oneshot channel, so tests decide the order in
//! which concurrent requests settle.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use studydeck_domain::{Flashcard, RawFile, SavedAs};
use studydeck_shared::{LoginRequest, LoginResponse, SignupResponse, UploadResponse};
use tokio::sync::oneshot;

use crate::ports::outbound::{ApiError, DocumentApiPort};

type Gate<T> = oneshot::Receiver<Result<T, ApiError>>;
pub type Release<T> = oneshot::Sender<Result<T, ApiError>>;

#[derive(Default)]
pub struct ScriptedApi {
    verify: Mutex<VecDeque<Gate<()>>>,
    summaries: Mutex<HashMap<String, Gate<String>>>,
    flashcards: Mutex<HashMap<String, Gate<Vec<Flashcard>>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate the next `verify_session` call.
    pub fn gate_verify(&self) -> Release<()> {
        let (tx, rx) = oneshot::channel();
        self.verify.lock().unwrap().push_back(rx);
        tx
    }

    pub fn gate_summary(&self, saved_as: &str) -> Release<String> {
        let (tx, rx) = oneshot::channel();
        self.summaries
            .lock()
            .unwrap()
            .insert(saved_as.to_string(), rx);
        tx
    }

    pub fn gate_flashcards(&self, saved_as: &str) -> Release<Vec<Flashcard>> {
        let (tx, rx) = oneshot::channel();
        self.flashcards
            .lock()
            .unwrap()
            .insert(saved_as.to_string(), rx);
        tx
    }

    /// Calls received so far, e.g. `"summary:a.pdf"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

async fn wait<T>(gate: Option<Gate<T>>, call: &str) -> Result<T, ApiError> {
    match gate {
        Some(gate) => gate
            .await
            .unwrap_or_else(|_| Err(ApiError::Network(format!("{call}: gate dropped")))),
        None => Err(ApiError::InvalidRequest(format!("{call}: not scripted"))),
    }
}

#[async_trait]
impl DocumentApiPort for ScriptedApi {
    async fn verify_session(&self) -> Result<(), ApiError> {
        self.record("verify".to_string());
        let gate = self.verify.lock().unwrap().pop_front();
        wait(gate, "verify").await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.record(format!("login:{}", request.username));
        wait(None, "login").await
    }

    async fn signup(&self, request: &LoginRequest) -> Result<SignupResponse, ApiError> {
        self.record(format!("signup:{}", request.username));
        wait(None, "signup").await
    }

    async fn upload(&self, file: &RawFile) -> Result<UploadResponse, ApiError> {
        self.record(format!("upload:{}", file.name()));
        wait(None, "upload").await
    }

    async fn generate_summary(&self, saved_as: &SavedAs) -> Result<String, ApiError> {
        self.record(format!("summary:{saved_as}"));
        let gate = self.summaries.lock().unwrap().remove(saved_as.as_str());
        wait(gate, "summary").await
    }

    async fn generate_flashcards(&self, saved_as: &SavedAs) -> Result<Vec<Flashcard>, ApiError> {
        self.record(format!("flashcards:{saved_as}"));
        let gate = self.flashcards.lock().unwrap().remove(saved_as.as_str());
        wait(gate, "flashcards").await
    }
}
