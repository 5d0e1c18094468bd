//! Platform abstraction ports
//!
//! These traits abstract host-specific operations so that:
//! 1. Application code remains platform-agnostic
//! 2. Platform-specific code is isolated in infrastructure
//! 3. Services are testable with in-memory implementations

use futures_util::future::BoxFuture;
use studydeck_domain::RawFile;

/// Async sleep abstraction
///
/// Used for the session gate's minimum display delay.
pub trait SleepProvider: Send + Sync {
    fn sleep_ms(&self, ms: u64) -> BoxFuture<'static, ()>;
}

/// Persistent key-value storage (access token)
pub trait StorageProvider: Send + Sync {
    /// Save a string value with the given key
    fn save(&self, key: &str, value: &str);

    /// Load a string value by key, returns None if not found
    fn load(&self, key: &str) -> Option<String>;

    /// Remove a value by key
    fn remove(&self, key: &str);
}

/// Local object store for file previews.
///
/// `create` hands out a reference URL that stays valid until `revoke`.
pub trait PreviewStore: Send + Sync {
    fn create(&self, file: &RawFile) -> String;

    fn revoke(&self, url: &str);
}

/// Navigation surface used for redirects.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;

    fn redirect(&self, path: &str);
}

/// Storage key constants
pub mod storage_keys {
    /// Access token returned by `/login`
    pub const TOKEN: &str = "token";
}
