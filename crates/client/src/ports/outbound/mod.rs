//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to interact with the document service and the
//! host platform without depending on concrete implementations.

pub mod api_port;
pub mod platform;

pub use api_port::{ApiError, DocumentApiPort};
#[cfg(test)]
pub use api_port::MockDocumentApiPort;
pub use platform::{storage_keys, Navigator, PreviewStore, SleepProvider, StorageProvider};
