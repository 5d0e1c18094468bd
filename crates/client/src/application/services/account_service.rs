//! Account actions: login, signup and the lock page
//!
//! The access token returned by login is persisted under
//! [`storage_keys::TOKEN`]; the HTTP adapter attaches it to later requests.

use std::sync::Arc;

use studydeck_shared::LoginRequest;

use crate::application::error::{LoginError, SignupError};
use crate::ports::outbound::{storage_keys, ApiError, DocumentApiPort, Navigator, StorageProvider};
use crate::routes::Route;

const SIGNUP_SUCCEEDED: &str = "Account created successfully";
const LOCK_MESSAGE: &str = "You need to be logged in to access this page";

/// What the lock page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockNotice {
    pub message: String,
    pub login_path: &'static str,
}

pub struct AccountService {
    api: Arc<dyn DocumentApiPort>,
    storage: Arc<dyn StorageProvider>,
    navigator: Arc<dyn Navigator>,
}

impl AccountService {
    pub fn new(
        api: Arc<dyn DocumentApiPort>,
        storage: Arc<dyn StorageProvider>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            storage,
            navigator,
        }
    }

    /// Log in, store the access token and move to the summary view.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), LoginError> {
        let request = LoginRequest::new(username, password);
        let response = self.api.login(&request).await.map_err(|e| {
            tracing::warn!(username, error = %e, "Login failed");
            login_error(&e)
        })?;

        let token = response
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or(LoginError::InvalidResponse)?;
        self.storage.save(storage_keys::TOKEN, &token);
        tracing::info!(username, "Logged in");

        self.navigator.redirect(Route::Summary.path());
        Ok(())
    }

    /// Create an account. Does not log in.
    ///
    /// Returns the confirmation message to show.
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<String, SignupError> {
        if password != confirm_password {
            return Err(SignupError::PasswordMismatch);
        }

        let request = LoginRequest::new(username, password);
        match self.api.signup(&request).await {
            Ok(response) => {
                tracing::info!(username, "Account created");
                Ok(response
                    .message
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| SIGNUP_SUCCEEDED.to_string()))
            }
            Err(e) => {
                tracing::warn!(username, error = %e, "Signup failed");
                Err(e
                    .server_message()
                    .map(|message| SignupError::Rejected(message.to_string()))
                    .unwrap_or(SignupError::Failed))
            }
        }
    }

    /// Drop the stored token and describe the lock page.
    pub fn lock(&self) -> LockNotice {
        self.storage.remove(storage_keys::TOKEN);
        LockNotice {
            message: LOCK_MESSAGE.to_string(),
            login_path: Route::Login.path(),
        }
    }

    pub fn has_token(&self) -> bool {
        self.storage.load(storage_keys::TOKEN).is_some()
    }
}

fn login_error(error: &ApiError) -> LoginError {
    if matches!(error, ApiError::Timeout) {
        return LoginError::Timeout;
    }
    if error.is_unauthorized() {
        return LoginError::InvalidCredentials;
    }
    if let Some(message) = error.server_message() {
        return LoginError::Rejected(message.to_string());
    }
    match error {
        ApiError::Network(_) => LoginError::Network,
        _ => LoginError::Unexpected,
    }
}
