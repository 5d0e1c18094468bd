//! Batch-in-flight flag

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Set for the whole duration of a submit batch.
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Raise the flag, or return `None` if it is already raised.
    ///
    /// The flag is lowered when the returned guard drops, whatever path the
    /// batch takes out.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard {
                flag: Arc::clone(&self.0),
            })
    }
}

#[derive(Debug)]
pub struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
