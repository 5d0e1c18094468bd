//! Result fetcher
//!
//! Retrieves one kind of derived artifact for the identifier held in the
//! current-file register. Each trigger reads the register once; the result is
//! applied only if the register has not moved on in the meantime, so racing
//! fetches resolve to the latest identifier's outcome.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use studydeck_domain::{ArtifactKind, DerivedArtifact, SavedAs};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::application::state::{CurrentFileRegister, FileTicket};
use crate::ports::outbound::{ApiError, DocumentApiPort};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchState {
    /// No identifier yet
    #[default]
    Idle,
    Loading {
        saved_as: SavedAs,
    },
    Loaded {
        saved_as: SavedAs,
        artifact: DerivedArtifact,
    },
    Errored {
        saved_as: SavedAs,
        reason: String,
    },
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading { .. })
    }

    pub fn artifact(&self) -> Option<&DerivedArtifact> {
        match self {
            FetchState::Loaded { artifact, .. } => Some(artifact),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Errored { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

pub struct ResultFetcher {
    kind: ArtifactKind,
    api: Arc<dyn DocumentApiPort>,
    register: CurrentFileRegister,
    state: watch::Sender<FetchState>,
    /// Register version behind the published state.
    applied: AtomicU64,
}

impl ResultFetcher {
    pub fn new(
        kind: ArtifactKind,
        api: Arc<dyn DocumentApiPort>,
        register: CurrentFileRegister,
    ) -> Self {
        let (state, _) = watch::channel(FetchState::Idle);
        Self {
            kind,
            api,
            register,
            state,
            applied: AtomicU64::new(0),
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    /// Fetch the artifact for the current identifier.
    ///
    /// Returns the fetcher's state once this trigger has settled, which is a
    /// newer trigger's state if this one was superseded.
    pub async fn refresh(&self) -> FetchState {
        let ticket = self.register.snapshot();
        let Some(saved_as) = ticket.saved_as.clone() else {
            self.apply(&ticket, FetchState::Idle);
            return self.state();
        };

        self.apply(
            &ticket,
            FetchState::Loading {
                saved_as: saved_as.clone(),
            },
        );
        tracing::debug!(kind = self.kind.label(), %saved_as, version = ticket.version, "Fetching artifact");

        let settled = match self.fetch(&saved_as).await {
            Ok(artifact) => FetchState::Loaded {
                saved_as: saved_as.clone(),
                artifact,
            },
            Err(e) => {
                tracing::warn!(kind = self.kind.label(), %saved_as, error = %e, "Artifact fetch failed");
                FetchState::Errored {
                    saved_as: saved_as.clone(),
                    reason: self.failure_reason(&e),
                }
            }
        };

        if !self.apply(&ticket, settled) {
            tracing::debug!(
                kind = self.kind.label(),
                %saved_as,
                version = ticket.version,
                "Discarding stale artifact"
            );
        }
        self.state()
    }

    /// Refresh on every register change.
    ///
    /// Each change spawns its own fetch; they may overlap. The task only holds
    /// the fetcher weakly: it ends at the first change after the fetcher is
    /// dropped, or when the returned handle is aborted. Callers that outlive
    /// the fetcher should abort it.
    pub fn follow(self: &Arc<Self>) -> JoinHandle<()> {
        let fetcher: Weak<Self> = Arc::downgrade(self);
        let mut changes = self.register.subscribe();
        tokio::spawn(async move {
            loop {
                let Some(trigger) = fetcher.upgrade() else {
                    break;
                };
                changes.borrow_and_update();
                tokio::spawn(async move {
                    trigger.refresh().await;
                });
                if changes.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    /// Wait until the state describes the register's current version and is
    /// no longer loading.
    ///
    /// Something must be refreshing, either [`follow`](Self::follow) or an
    /// explicit [`refresh`](Self::refresh), or this waits forever.
    pub async fn settled(&self) -> FetchState {
        let mut states = self.state.subscribe();
        let mut changes = self.register.subscribe();
        loop {
            changes.borrow_and_update();
            let state = states.borrow_and_update().clone();
            let current = self.applied.load(Ordering::Acquire) == self.register.version();
            if current && !state.is_loading() {
                return state;
            }
            // Both senders are held by `self`, so neither wait can fail.
            tokio::select! {
                _ = states.changed() => {}
                _ = changes.changed() => {}
            }
        }
    }

    async fn fetch(&self, saved_as: &SavedAs) -> Result<DerivedArtifact, ApiError> {
        match self.kind {
            ArtifactKind::Summary => self
                .api
                .generate_summary(saved_as)
                .await
                .map(DerivedArtifact::SummaryText),
            ArtifactKind::Flashcards => self
                .api
                .generate_flashcards(saved_as)
                .await
                .map(DerivedArtifact::FlashcardSet),
        }
    }

    /// Most specific explanation available for a failed fetch.
    fn failure_reason(&self, error: &ApiError) -> String {
        error
            .server_message()
            .map(str::to_string)
            .or_else(|| error.transport_message())
            .unwrap_or_else(|| self.kind.fallback_error().to_string())
    }

    /// Publish `next` only if `ticket` is still the register's current version.
    fn apply(&self, ticket: &FileTicket, next: FetchState) -> bool {
        let register = &self.register;
        self.state.send_if_modified(|state| {
            if !register.is_current(ticket) {
                return false;
            }
            self.applied.store(ticket.version, Ordering::Release);
            *state = next;
            true
        })
    }
}
