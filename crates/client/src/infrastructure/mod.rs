//! Infrastructure layer - Adapters for the outbound ports

pub mod config;
pub mod file_source;
pub mod http_client;
pub mod platform;

#[cfg(test)]
pub mod testing;

pub use config::{ClientConfig, ConfigError};
pub use file_source::{load_raw_file, media_type_for, FileSourceError};
pub use http_client::HttpDocumentClient;
