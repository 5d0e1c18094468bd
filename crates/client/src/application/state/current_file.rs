//! Current-file register
//!
//! Single slot holding the most recent server-assigned identifier. Every write
//! bumps a monotonic version; fetchers capture a [`FileTicket`] once per
//! trigger and drop their result if the version has moved on by the time it
//! arrives.

use std::sync::Arc;

use studydeck_domain::SavedAs;
use tokio::sync::watch;

/// Snapshot of the register taken at dispatch time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTicket {
    pub version: u64,
    pub saved_as: Option<SavedAs>,
}

#[derive(Debug, Clone)]
pub struct CurrentFileRegister {
    slot: Arc<watch::Sender<FileTicket>>,
}

impl CurrentFileRegister {
    pub fn new() -> Self {
        let (slot, _) = watch::channel(FileTicket::default());
        Self {
            slot: Arc::new(slot),
        }
    }

    /// Make `saved_as` the current identifier.
    pub fn set(&self, saved_as: SavedAs) -> FileTicket {
        self.write(Some(saved_as))
    }

    /// Forget the current identifier so stale results are not shown.
    pub fn reset(&self) -> FileTicket {
        self.write(None)
    }

    pub fn snapshot(&self) -> FileTicket {
        self.slot.borrow().clone()
    }

    pub fn version(&self) -> u64 {
        self.slot.borrow().version
    }

    pub fn is_current(&self, ticket: &FileTicket) -> bool {
        self.version() == ticket.version
    }

    /// Receiver notified on every write.
    pub fn subscribe(&self) -> watch::Receiver<FileTicket> {
        self.slot.subscribe()
    }

    fn write(&self, saved_as: Option<SavedAs>) -> FileTicket {
        let mut written = FileTicket::default();
        self.slot.send_modify(|ticket| {
            ticket.version += 1;
            ticket.saved_as = saved_as;
            written = ticket.clone();
        });
        written
    }
}

impl Default for CurrentFileRegister {
    fn default() -> Self {
        Self::new()
    }
}
