//! Client configuration

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use studydeck_domain::UploadRules;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 120_000;
pub const DEFAULT_AUTH_MIN_DISPLAY_MS: u64 = 200;

const MIB: u64 = 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} is not a valid URL: {value}")]
    InvalidUrl { key: &'static str, value: String },

    #[error("{key} must be a non-negative integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },
}

/// Client configuration loaded from environment
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Document service base URL
    pub api_base_url: Url,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Upload limits
    pub upload_rules: UploadRules,
    /// Minimum time the session check stays visible
    pub auth_min_display_ms: u64,
    /// Token store location; platform default when unset
    pub storage_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = parse_base_url(
            "STUDYDECK_API_BASE_URL",
            &lookup("STUDYDECK_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        )?;

        let timeout_ms = number(
            &lookup,
            "STUDYDECK_REQUEST_TIMEOUT_MS",
            DEFAULT_REQUEST_TIMEOUT_MS,
        )?;
        if timeout_ms == 0 {
            return Err(ConfigError::Zero {
                key: "STUDYDECK_REQUEST_TIMEOUT_MS",
            });
        }

        let max_files = number(
            &lookup,
            "STUDYDECK_MAX_FILES",
            UploadRules::DEFAULT_MAX_FILES as u64,
        )?;
        if max_files == 0 {
            return Err(ConfigError::Zero {
                key: "STUDYDECK_MAX_FILES",
            });
        }
        let max_file_size_mb = number(
            &lookup,
            "STUDYDECK_MAX_FILE_SIZE_MB",
            UploadRules::DEFAULT_MAX_FILE_SIZE / MIB,
        )?;

        Ok(Self {
            api_base_url,
            request_timeout: Duration::from_millis(timeout_ms),
            upload_rules: UploadRules::default()
                .with_max_files(max_files as usize)
                .with_max_file_size(max_file_size_mb.saturating_mul(MIB)),
            auth_min_display_ms: number(
                &lookup,
                "STUDYDECK_AUTH_MIN_DISPLAY_MS",
                DEFAULT_AUTH_MIN_DISPLAY_MS,
            )?,
            storage_path: lookup("STUDYDECK_STORAGE_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

/// Accepts full URLs or a bare `host:port`, which is taken as plain HTTP.
fn parse_base_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    match Url::parse(&candidate) {
        Ok(url) if !url.cannot_be_a_base() && url.host().is_some() => Ok(url),
        _ => Err(ConfigError::InvalidUrl {
            key,
            value: raw.to_string(),
        }),
    }
}

fn number<F>(lookup: &F, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        None => Ok(default),
    }
}
