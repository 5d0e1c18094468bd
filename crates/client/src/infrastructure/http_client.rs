//! HTTP adapter for the document service
//!
//! Credential-bearing: a cookie store keeps the session cookie set by the
//! service, and the stored access token is sent as a bearer header.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use studydeck_domain::{Flashcard, RawFile, SavedAs};
use studydeck_shared::{
    endpoints, ErrorResponse, FlashcardsResponse, LoginRequest, LoginResponse, ServerReply,
    SignupResponse, SummaryResponse, UploadResponse,
};
use url::Url;

use crate::ports::outbound::{storage_keys, ApiError, DocumentApiPort, StorageProvider};

#[derive(Clone)]
pub struct HttpDocumentClient {
    client: Client,
    base_url: Url,
    storage: Arc<dyn StorageProvider>,
}

impl HttpDocumentClient {
    pub fn new(base_url: Url, timeout: Duration, storage: Arc<dyn StorageProvider>) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url,
            storage,
        }
    }

    /// Append an endpoint path to the base URL, encoding each segment.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidRequest(format!("{} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.storage.load(storage_keys::TOKEN) {
            Some(token) if !token.is_empty() => request.bearer_auth(token),
            _ => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        self.authorize(request).send().await.map_err(transport_error)
    }
}

/// Decode a reply, treating `{ "error": ... }` as a failure whatever the status.
async fn read_reply<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .map(|e| e.error);
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str::<ServerReply<T>>(&body)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .into_result()
        .map_err(ApiError::Server)
}

fn transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Timeout
    } else if error.is_builder() {
        ApiError::InvalidRequest(error.to_string())
    } else if error.is_decode() {
        ApiError::Parse(error.to_string())
    } else {
        ApiError::Network(error.to_string())
    }
}

#[async_trait]
impl DocumentApiPort for HttpDocumentClient {
    async fn verify_session(&self) -> Result<(), ApiError> {
        let response = self
            .send(self.client.get(self.endpoint(endpoints::VERIFY)?))
            .await?;
        if response.status() == StatusCode::OK {
            return Ok(());
        }
        let status = response.status().as_u16();
        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .map(|e| e.error);
        Err(ApiError::Status { status, message })
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response = self
            .send(self.client.post(self.endpoint(endpoints::LOGIN)?).json(request))
            .await?;
        read_reply(response).await
    }

    async fn signup(&self, request: &LoginRequest) -> Result<SignupResponse, ApiError> {
        let response = self
            .send(self.client.post(self.endpoint(endpoints::SIGNUP)?).json(request))
            .await?;
        read_reply(response).await
    }

    async fn upload(&self, file: &RawFile) -> Result<UploadResponse, ApiError> {
        let part = Part::bytes(file.content().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.media_type())
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let form = Form::new().part(endpoints::UPLOAD_FIELD, part);

        tracing::debug!(file = %file.name(), size = file.size(), "Uploading file");
        let response = self
            .send(self.client.post(self.endpoint(endpoints::UPLOAD)?).multipart(form))
            .await?;
        read_reply(response).await
    }

    async fn generate_summary(&self, saved_as: &SavedAs) -> Result<String, ApiError> {
        let url = self.endpoint(&endpoints::generate_summary(saved_as.as_str()))?;
        let response = self.send(self.client.get(url)).await?;
        read_reply::<SummaryResponse>(response)
            .await
            .map(|reply| reply.summary)
    }

    async fn generate_flashcards(&self, saved_as: &SavedAs) -> Result<Vec<Flashcard>, ApiError> {
        let url = self.endpoint(&endpoints::generate_flashcards(saved_as.as_str()))?;
        let response = self.send(self.client.get(url)).await?;
        read_reply::<FlashcardsResponse>(response)
            .await
            .map(FlashcardsResponse::into_cards)
    }
}
