//! File intake store
//!
//! Ordered, in-memory collection of accepted files. New selections are
//! validated one by one and appended; the per-file error board is replaced on
//! every `add`. Image files get a preview reference that lives exactly as long
//! as their entry.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use studydeck_domain::{format_file_size, validate, ErrorBoard, FileId, RawFile, UploadRules};

use crate::application::error::{IntakeError, SubmitError};
use crate::application::state::{BusyFlag, BusyGuard, CurrentFileRegister};
use crate::ports::outbound::PreviewStore;

/// Preview reference acquired when an image is accepted.
///
/// Revoked on drop.
pub struct PreviewHandle {
    url: String,
    store: Arc<dyn PreviewStore>,
}

impl PreviewHandle {
    pub fn acquire(store: Arc<dyn PreviewStore>, file: &RawFile) -> Self {
        let url = store.create(file);
        Self { url, store }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.store.revoke(&self.url);
    }
}

impl std::fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewHandle").field("url", &self.url).finish()
    }
}

#[derive(Debug)]
struct IntakeEntry {
    id: FileId,
    file: RawFile,
    preview: Option<PreviewHandle>,
}

/// Read-only view of an accepted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeEntryView {
    pub id: FileId,
    pub name: String,
    pub size: u64,
    pub formatted_size: String,
    pub preview_url: Option<String>,
}

#[derive(Debug, Default)]
struct IntakeInner {
    entries: Vec<IntakeEntry>,
    next_id: u64,
    errors: ErrorBoard,
}

pub struct IntakeStore {
    rules: UploadRules,
    previews: Arc<dyn PreviewStore>,
    register: CurrentFileRegister,
    busy: BusyFlag,
    inner: Mutex<IntakeInner>,
}

impl IntakeStore {
    pub fn new(
        rules: UploadRules,
        previews: Arc<dyn PreviewStore>,
        register: CurrentFileRegister,
        busy: BusyFlag,
    ) -> Self {
        Self {
            rules,
            previews,
            register,
            busy,
            inner: Mutex::new(IntakeInner::default()),
        }
    }

    pub fn rules(&self) -> &UploadRules {
        &self.rules
    }

    /// Validate and append a selection.
    ///
    /// Returns the ids of the accepted files. Rejected files are listed on the
    /// error board by name. If the selection would push the store past
    /// `max_files`, nothing changes and `CountExceeded` is returned.
    pub fn add(&self, candidates: Vec<RawFile>) -> Result<Vec<FileId>, IntakeError> {
        let mut inner = self.lock_idle()?;

        let attempted = inner.entries.len() + candidates.len();
        if attempted > self.rules.max_files {
            tracing::info!(
                max_files = self.rules.max_files,
                attempted,
                "Selection exceeds file limit"
            );
            return Err(IntakeError::CountExceeded {
                max: self.rules.max_files,
                attempted,
            });
        }

        let mut errors = ErrorBoard::new();
        let mut accepted = Vec::new();
        for file in candidates {
            if let Err(rejection) =
                validate(&file, self.rules.max_file_size, &self.rules.allowed_types)
            {
                tracing::debug!(file = %file.name(), %rejection, "File rejected");
                errors.insert(file.name(), rejection.to_string());
                continue;
            }

            let id = FileId::new(inner.next_id);
            inner.next_id += 1;
            let preview = file
                .is_image()
                .then(|| PreviewHandle::acquire(Arc::clone(&self.previews), &file));
            tracing::debug!(file_id = %id, file = %file.name(), size = file.size(), "File accepted");
            inner.entries.push(IntakeEntry { id, file, preview });
            accepted.push(id);
        }

        inner.errors = errors;
        Ok(accepted)
    }

    /// Drop one entry, releasing its preview. Returns whether it existed.
    pub fn remove(&self, id: FileId) -> Result<bool, IntakeError> {
        let mut inner = self.lock_idle()?;
        let Some(position) = inner.entries.iter().position(|entry| entry.id == id) else {
            return Ok(false);
        };
        let entry = inner.entries.remove(position);
        drop(entry);
        Ok(true)
    }

    /// Release every preview, empty the store and forget the current
    /// identifier.
    pub fn clear(&self) -> Result<(), IntakeError> {
        {
            let mut inner = self.lock_idle()?;
            inner.entries.clear();
            inner.errors.clear();
        }
        self.register.reset();
        tracing::debug!("Intake store cleared");
        Ok(())
    }

    pub fn files(&self) -> Vec<IntakeEntryView> {
        self.lock()
            .entries
            .iter()
            .map(|entry| IntakeEntryView {
                id: entry.id,
                name: entry.file.name().to_string(),
                size: entry.file.size(),
                formatted_size: format_file_size(entry.file.size()),
                preview_url: entry.preview.as_ref().map(|p| p.url().to_string()),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    pub fn errors(&self) -> ErrorBoard {
        self.lock().errors.clone()
    }

    /// Raise the busy flag and take the batch snapshot under one lock, so no
    /// mutation can land between the two.
    ///
    /// The error board is cleared for the new batch.
    pub(crate) fn begin_batch(
        &self,
    ) -> Result<(BusyGuard, Vec<(FileId, RawFile)>), SubmitError> {
        let mut inner = self.lock();
        if inner.entries.is_empty() {
            return Err(SubmitError::EmptySelection);
        }
        let guard = self
            .busy
            .try_acquire()
            .ok_or(SubmitError::AlreadyRunning)?;
        inner.errors.clear();
        let selection = inner
            .entries
            .iter()
            .map(|entry| (entry.id, entry.file.clone()))
            .collect();
        Ok((guard, selection))
    }

    pub(crate) fn merge_errors(&self, errors: ErrorBoard) {
        self.lock().errors.merge(errors);
    }

    fn lock(&self) -> MutexGuard<'_, IntakeInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock for mutation. The busy flag is only raised under this lock.
    fn lock_idle(&self) -> Result<MutexGuard<'_, IntakeInner>, IntakeError> {
        let inner = self.lock();
        if self.busy.is_busy() {
            return Err(IntakeError::Busy);
        }
        Ok(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::MemoryPreviewStore;
    use studydeck_domain::media_types;

    fn store(max_files: usize) -> (IntakeStore, Arc<MemoryPreviewStore>, BusyFlag) {
        let previews = Arc::new(MemoryPreviewStore::new());
        let busy = BusyFlag::new();
        let store = IntakeStore::new(
            UploadRules::default().with_max_files(max_files),
            previews.clone(),
            CurrentFileRegister::new(),
            busy.clone(),
        );
        (store, previews, busy)
    }

    fn pdf(name: &str) -> RawFile {
        RawFile::new(name, media_types::PDF, b"%PDF-1.4".to_vec())
    }

    fn png(name: &str) -> RawFile {
        RawFile::new(name, "image/png", vec![0x89, 0x50, 0x4e, 0x47])
    }

    #[test]
    fn accepted_files_get_unique_ids_in_order() {
        let (store, _, _) = store(3);
        let first = store.add(vec![pdf("a.pdf"), pdf("b.pdf")]).unwrap();
        let second = store.add(vec![pdf("c.pdf")]).unwrap();

        let names: Vec<_> = store.files().into_iter().map(|f| f.name).collect();
        assert_eq!(names, ["a.pdf", "b.pdf", "c.pdf"]);
        assert_eq!(first.len(), 2);
        assert_ne!(first[0], first[1]);
        assert!(!first.contains(&second[0]));
    }

    #[test]
    fn count_exceeded_leaves_store_unchanged_and_repeats() {
        let (store, _, _) = store(1);
        store.add(vec![pdf("kept.pdf")]).unwrap();
        let before = store.files();

        for _ in 0..2 {
            let err = store.add(vec![pdf("extra.pdf")]).unwrap_err();
            assert_eq!(
                err,
                IntakeError::CountExceeded {
                    max: 1,
                    attempted: 2
                }
            );
            assert_eq!(store.files(), before);
        }
    }

    #[test]
    fn rejections_replace_previous_error_board() {
        let (store, _, _) = store(5);
        store
            .add(vec![RawFile::new("song.mp3", "audio/mpeg", vec![1])])
            .unwrap();
        assert_eq!(
            store.errors().get("song.mp3"),
            Some("song.mp3: Invalid file type")
        );

        let huge = RawFile::new(
            "huge.pdf",
            media_types::PDF,
            vec![0u8; (UploadRules::DEFAULT_MAX_FILE_SIZE + 1) as usize],
        );
        let accepted = store.add(vec![huge, pdf("ok.pdf")]).unwrap();

        let errors = store.errors();
        assert_eq!(accepted.len(), 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("huge.pdf"), Some("huge.pdf: File must be under 10 MB"));
        assert!(errors.get("song.mp3").is_none());
    }

    #[test]
    fn previews_are_created_only_for_images() {
        let previews = Arc::new(MemoryPreviewStore::new());
        let rules = UploadRules::default()
            .with_max_files(2)
            .with_allowed_type("image/png");
        let store = IntakeStore::new(
            rules,
            previews.clone(),
            CurrentFileRegister::new(),
            BusyFlag::new(),
        );

        store.add(vec![png("scan.png"), pdf("notes.pdf")]).unwrap();

        let files = store.files();
        assert!(files[0].preview_url.is_some());
        assert!(files[1].preview_url.is_none());
        assert_eq!(previews.outstanding(), 1);
    }

    #[test]
    fn remove_revokes_preview() {
        let previews = Arc::new(MemoryPreviewStore::new());
        let rules = UploadRules::default().with_allowed_type("image/png");
        let store = IntakeStore::new(
            rules,
            previews.clone(),
            CurrentFileRegister::new(),
            BusyFlag::new(),
        );
        let ids = store.add(vec![png("scan.png")]).unwrap();

        assert!(store.remove(ids[0]).unwrap());
        assert!(store.is_empty());
        assert_eq!(previews.outstanding(), 0);
        assert!(!store.remove(ids[0]).unwrap());
    }

    #[test]
    fn clear_releases_everything_and_forgets_current_file() {
        let previews = Arc::new(MemoryPreviewStore::new());
        let register = CurrentFileRegister::new();
        let rules = UploadRules::default()
            .with_max_files(3)
            .with_allowed_type("image/png");
        let store = IntakeStore::new(rules, previews.clone(), register.clone(), BusyFlag::new());
        store
            .add(vec![
                png("a.png"),
                png("b.png"),
                RawFile::new("bad.exe", "application/x-msdownload", vec![1]),
            ])
            .unwrap();
        register.set(studydeck_domain::SavedAs::new("a_1.png").unwrap());

        store.clear().unwrap();

        assert!(store.files().is_empty());
        assert!(store.errors().is_empty());
        assert_eq!(previews.outstanding(), 0);
        assert_eq!(register.snapshot().saved_as, None);
    }

    #[test]
    fn dropping_the_store_revokes_previews() {
        let previews = Arc::new(MemoryPreviewStore::new());
        {
            let store = IntakeStore::new(
                UploadRules::default().with_allowed_type("image/jpeg"),
                previews.clone(),
                CurrentFileRegister::new(),
                BusyFlag::new(),
            );
            store
                .add(vec![RawFile::new("photo.jpg", "image/jpeg", vec![1, 2])])
                .unwrap();
            assert_eq!(previews.outstanding(), 1);
        }
        assert_eq!(previews.outstanding(), 0);
    }

    #[test]
    fn mutations_are_refused_while_busy() {
        let (store, _, busy) = store(2);
        let ids = store.add(vec![pdf("a.pdf")]).unwrap();
        let _guard = busy.try_acquire().unwrap();

        assert_eq!(store.add(vec![pdf("b.pdf")]), Err(IntakeError::Busy));
        assert_eq!(store.remove(ids[0]), Err(IntakeError::Busy));
        assert_eq!(store.clear(), Err(IntakeError::Busy));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn batch_snapshot_and_busy_flag_are_taken_together() {
        let (store, _, busy) = store(3);
        assert_eq!(
            store.begin_batch().map(|(_, files)| files.len()),
            Err(SubmitError::EmptySelection)
        );

        store
            .add(vec![pdf("a.pdf"), RawFile::new("clip.mp4", "video/mp4", vec![0])])
            .unwrap();
        assert!(!store.errors().is_empty());

        let (guard, selection) = store.begin_batch().unwrap();
        assert!(busy.is_busy());
        assert!(store.errors().is_empty());
        assert_eq!(selection.len(), 1);
        assert_eq!(selection[0].1.name(), "a.pdf");

        assert_eq!(store.add(vec![pdf("late.pdf")]), Err(IntakeError::Busy));
        assert_eq!(
            store.begin_batch().map(|(_, files)| files.len()),
            Err(SubmitError::AlreadyRunning)
        );
        assert_eq!(store.len(), 1);

        drop(guard);
        assert!(!busy.is_busy());
        store.add(vec![pdf("late.pdf")]).unwrap();
        assert_eq!(store.len(), 2);
    }
}
