//! Upload orchestrator
//!
//! Uploads the intake selection one file at a time, in insertion order. Each
//! success becomes the current identifier (last success wins); each failure is
//! posted to the intake error board under the file's name and the batch moves
//! on. The busy flag is raised for the whole batch.

use std::sync::{Arc, Mutex, PoisonError};

use futures_util::stream::{self, StreamExt};
use studydeck_domain::{ErrorBoard, FileId, RawFile, SavedAs, UploadOutcome};

use crate::application::error::SubmitError;
use crate::application::services::intake_service::IntakeStore;
use crate::application::state::{BusyFlag, CurrentFileRegister};
use crate::ports::outbound::DocumentApiPort;

const UPLOAD_FAILED: &str = "Upload failed";

/// Outcome of one file within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub id: FileId,
    pub filename: String,
    pub outcome: UploadOutcome,
}

/// Everything a finished batch produced, one entry per submitted file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitReport {
    pub files: Vec<FileReport>,
    pub last_saved_as: Option<SavedAs>,
}

impl SubmitReport {
    /// Fold step: record one settled upload.
    pub fn record(mut self, report: FileReport) -> Self {
        if let Some(saved_as) = report.outcome.saved_as() {
            self.last_saved_as = Some(saved_as.clone());
        }
        self.files.push(report);
        self
    }

    pub fn successes(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.outcome.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.outcome.is_failure())
    }

    /// Failures keyed by filename, ready for the error board.
    pub fn errors(&self) -> ErrorBoard {
        self.files
            .iter()
            .filter_map(|f| match &f.outcome {
                UploadOutcome::Failed(reason) => Some((f.filename.clone(), reason.clone())),
                _ => None,
            })
            .collect()
    }
}

pub struct UploadOrchestrator {
    api: Arc<dyn DocumentApiPort>,
    intake: Arc<IntakeStore>,
    register: CurrentFileRegister,
    busy: BusyFlag,
    last_report: Mutex<Option<SubmitReport>>,
}

impl UploadOrchestrator {
    pub fn new(
        api: Arc<dyn DocumentApiPort>,
        intake: Arc<IntakeStore>,
        register: CurrentFileRegister,
        busy: BusyFlag,
    ) -> Self {
        Self {
            api,
            intake,
            register,
            busy,
            last_report: Mutex::new(None),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn last_report(&self) -> Option<SubmitReport> {
        self.last_report
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Upload every file currently in the intake store.
    ///
    /// An empty selection fails before any request is made.
    pub async fn submit(&self) -> Result<SubmitReport, SubmitError> {
        let (_busy, selection) = self.intake.begin_batch()?;
        tracing::info!(files = selection.len(), "Starting upload batch");

        let report = stream::iter(selection)
            .fold(SubmitReport::default(), |report, (id, file)| async move {
                let outcome = self.upload_one(id, &file).await;
                match &outcome {
                    UploadOutcome::Succeeded(saved_as) => {
                        self.register.set(saved_as.clone());
                    }
                    UploadOutcome::Failed(reason) => {
                        let mut errors = ErrorBoard::new();
                        errors.insert(file.name(), reason.as_str());
                        self.intake.merge_errors(errors);
                    }
                    UploadOutcome::Pending => {}
                }
                report.record(FileReport {
                    id,
                    filename: file.name().to_string(),
                    outcome,
                })
            })
            .await;

        tracing::info!(
            succeeded = report.successes().count(),
            failed = report.failures().count(),
            "Upload batch finished"
        );
        *self
            .last_report
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(report.clone());
        Ok(report)
    }

    async fn upload_one(&self, id: FileId, file: &RawFile) -> UploadOutcome {
        match self.api.upload(file).await {
            Ok(response) => match SavedAs::new(response.saved_as) {
                Ok(saved_as) => {
                    tracing::debug!(file_id = %id, %saved_as, "Upload succeeded");
                    UploadOutcome::Succeeded(saved_as)
                }
                Err(e) => {
                    tracing::warn!(file_id = %id, error = %e, "Upload reply had no usable identifier");
                    UploadOutcome::Failed(UPLOAD_FAILED.to_string())
                }
            },
            Err(e) => {
                tracing::warn!(file_id = %id, file = %file.name(), error = %e, "Upload failed");
                UploadOutcome::Failed(
                    e.server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| UPLOAD_FAILED.to_string()),
                )
            }
        }
    }
}
