//! Desktop platform implementations
//!
//! Provides platform-specific implementations for desktop using
//! tokio, the filesystem and in-process state.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use directories::ProjectDirs;
use futures_util::future::BoxFuture;
use studydeck_domain::RawFile;
use uuid::Uuid;

use crate::ports::outbound::{Navigator, PreviewStore, SleepProvider, StorageProvider};

/// Desktop sleep provider using tokio
#[derive(Clone, Default)]
pub struct TokioSleepProvider;

impl SleepProvider for TokioSleepProvider {
    fn sleep_ms(&self, ms: u64) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(Duration::from_millis(ms)))
    }
}

/// Desktop storage provider with file-based persistence
///
/// Stores key-value pairs in a JSON file at:
/// - Linux: ~/.config/studydeck/storage.json
/// - macOS: ~/Library/Application Support/io.studydeck.studydeck/storage.json
/// - Windows: C:\Users\<User>\AppData\Roaming\studydeck\studydeck\config\storage.json
#[derive(Clone)]
pub struct FileStorageProvider {
    /// Path to the storage file
    storage_path: PathBuf,
    /// In-memory cache of stored values
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl Default for FileStorageProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStorageProvider {
    /// Create a storage provider in the platform config directory
    pub fn new() -> Self {
        let storage_path = if let Some(dirs) = ProjectDirs::from("io", "studydeck", "studydeck") {
            dirs.config_dir().join("storage.json")
        } else {
            PathBuf::from("studydeck_storage.json")
        };
        Self::at(storage_path)
    }

    /// Create a storage provider backed by `storage_path`
    ///
    /// Loads existing data from the file if it exists.
    pub fn at(storage_path: impl Into<PathBuf>) -> Self {
        let storage_path = storage_path.into();
        let cache = load_entries(&storage_path);
        tracing::debug!(path = ?storage_path, "Token storage initialized");

        Self {
            storage_path,
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Persist the cache to disk
    fn persist(&self) {
        if let Some(parent) = self.storage_path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::error!(error = %e, "Failed to create storage directory");
                return;
            }
        }

        let data = {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            serde_json::to_string_pretty(&*cache)
        };
        match data {
            Ok(data) => {
                if let Err(e) = fs::write(&self.storage_path, data) {
                    tracing::error!(error = %e, "Failed to write storage file");
                }
            }
            Err(e) => tracing::error!(error = %e, "Failed to serialize storage data"),
        }
    }
}

fn load_entries(path: &Path) -> HashMap<String, String> {
    if !path.exists() {
        return HashMap::new();
    }
    match fs::read_to_string(path) {
        Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to parse storage file");
            HashMap::new()
        }),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read storage file");
            HashMap::new()
        }
    }
}

impl StorageProvider for FileStorageProvider {
    fn save(&self, key: &str, value: &str) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self.persist();
    }

    fn load(&self, key: &str) -> Option<String> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn remove(&self, key: &str) {
        let removed = self
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        if removed.is_some() {
            self.persist();
        }
    }
}

/// In-process preview store handing out `blob:` style references.
#[derive(Debug, Default)]
pub struct MemoryPreviewStore {
    previews: Mutex<HashMap<String, String>>,
}

impl MemoryPreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of references created and not yet revoked.
    pub fn outstanding(&self) -> usize {
        self.lock().len()
    }

    /// Name of the file behind a live reference.
    pub fn resolve(&self, url: &str) -> Option<String> {
        self.lock().get(url).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.previews.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreviewStore for MemoryPreviewStore {
    fn create(&self, file: &RawFile) -> String {
        let url = format!("blob:studydeck/{}", Uuid::new_v4());
        self.lock().insert(url.clone(), file.name().to_string());
        url
    }

    fn revoke(&self, url: &str) {
        if self.lock().remove(url).is_none() {
            tracing::debug!(url, "Revoked unknown preview");
        }
    }
}

/// Navigator for a headless desktop session: tracks the current path.
#[derive(Debug)]
pub struct DesktopNavigator {
    current: Mutex<String>,
}

impl DesktopNavigator {
    pub fn new(start_path: &str) -> Self {
        Self {
            current: Mutex::new(start_path.to_string()),
        }
    }
}

impl Navigator for DesktopNavigator {
    fn current_path(&self) -> String {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn redirect(&self, path: &str) {
        tracing::info!(path, "Redirecting");
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = path.to_string();
    }
}
