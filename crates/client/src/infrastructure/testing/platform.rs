//! In-memory platform fakes

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use futures_util::future::{self, BoxFuture};

use crate::ports::outbound::{Navigator, SleepProvider, StorageProvider};

/// Resolves immediately and records what was asked for.
#[derive(Default)]
pub struct InstantSleep {
    requested: Mutex<Vec<u64>>,
}

impl InstantSleep {
    pub fn requested(&self) -> Vec<u64> {
        self.requested.lock().unwrap().clone()
    }
}

impl SleepProvider for InstantSleep {
    fn sleep_ms(&self, ms: u64) -> BoxFuture<'static, ()> {
        self.requested.lock().unwrap().push(ms);
        Box::pin(future::ready(()))
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    data: RwLock<HashMap<String, String>>,
}

impl StorageProvider for MemoryStorage {
    fn save(&self, key: &str, value: &str) {
        self.data
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn load(&self, key: &str) -> Option<String> {
        self.data.read().unwrap().get(key).cloned()
    }

    fn remove(&self, key: &str) {
        self.data.write().unwrap().remove(key);
    }
}

pub struct RecordingNavigator {
    current: Mutex<String>,
    redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Self {
        Self {
            current: Mutex::new(path.to_string()),
            redirects: Mutex::new(Vec::new()),
        }
    }

    /// Move without recording a redirect, as a user navigation would.
    pub fn visit(&self, path: &str) {
        *self.current.lock().unwrap() = path.to_string();
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.current.lock().unwrap().clone()
    }

    fn redirect(&self, path: &str) {
        self.visit(path);
        self.redirects.lock().unwrap().push(path.to_string());
    }
}
