//! Platform-specific implementations
//!
//! Desktop implementations of the platform abstraction traits defined in
//! `ports/outbound/platform.rs`, plus the container that hands them to the
//! application services.

mod desktop;

use std::sync::Arc;

pub use desktop::{DesktopNavigator, FileStorageProvider, MemoryPreviewStore, TokioSleepProvider};

use crate::infrastructure::config::ClientConfig;
use crate::ports::outbound::{Navigator, PreviewStore, SleepProvider, StorageProvider};

/// Platform services bundle.
#[derive(Clone)]
pub struct Platform {
    pub sleep: Arc<dyn SleepProvider>,
    pub storage: Arc<dyn StorageProvider>,
    pub previews: Arc<dyn PreviewStore>,
    pub navigator: Arc<dyn Navigator>,
}

/// Create the desktop platform for `config`.
pub fn create_platform(config: &ClientConfig, start_path: &str) -> Platform {
    let storage = match &config.storage_path {
        Some(path) => FileStorageProvider::at(path.clone()),
        None => FileStorageProvider::new(),
    };
    Platform {
        sleep: Arc::new(TokioSleepProvider),
        storage: Arc::new(storage),
        previews: Arc::new(MemoryPreviewStore::new()),
        navigator: Arc::new(DesktopNavigator::new(start_path)),
    }
}
