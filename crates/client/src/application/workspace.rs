//! One page's worth of pipeline: intake, upload and result fetching wired
//! around a shared current-file register.

use std::sync::Arc;

use studydeck_domain::{ArtifactKind, UploadRules};
use tokio::task::JoinHandle;

use crate::application::services::{IntakeStore, ResultFetcher, UploadOrchestrator};
use crate::application::state::{BusyFlag, CurrentFileRegister};
use crate::ports::outbound::{DocumentApiPort, PreviewStore};

pub struct Workspace {
    intake: Arc<IntakeStore>,
    orchestrator: UploadOrchestrator,
    fetcher: Arc<ResultFetcher>,
    register: CurrentFileRegister,
    follower: Option<JoinHandle<()>>,
}

impl Workspace {
    pub fn new(
        kind: ArtifactKind,
        rules: UploadRules,
        api: Arc<dyn DocumentApiPort>,
        previews: Arc<dyn PreviewStore>,
    ) -> Self {
        let register = CurrentFileRegister::new();
        let busy = BusyFlag::new();
        let intake = Arc::new(IntakeStore::new(
            rules,
            previews,
            register.clone(),
            busy.clone(),
        ));
        let orchestrator =
            UploadOrchestrator::new(Arc::clone(&api), intake.clone(), register.clone(), busy);
        let fetcher = Arc::new(ResultFetcher::new(kind, api, register.clone()));

        Self {
            intake,
            orchestrator,
            fetcher,
            register,
            follower: None,
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        self.fetcher.kind()
    }

    pub fn intake(&self) -> &IntakeStore {
        &self.intake
    }

    pub fn orchestrator(&self) -> &UploadOrchestrator {
        &self.orchestrator
    }

    pub fn fetcher(&self) -> &Arc<ResultFetcher> {
        &self.fetcher
    }

    pub fn register(&self) -> &CurrentFileRegister {
        &self.register
    }

    /// Start fetching automatically whenever an upload succeeds.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start_following(&mut self) {
        if self.follower.is_none() {
            self.follower = Some(self.fetcher.follow());
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Some(follower) = self.follower.take() {
            follower.abort();
        }
    }
}
