//! Multi-file upload coordinator for the photo upload modal.
//!
//! Each queued file moves through a small state machine:
//!
//! ```text
//! selected -> validating -> { rejected | previewing }
//! previewing -> uploading -> { uploaded | failed }
//! ```
//!
//! Validation mirrors the server's MIME/size rules for fast feedback; the
//! server re-validates authoritatively. Dispatch is fire-and-forget
//! parallel -- every previewing file goes out at once, each lands on its own
//! status, and one failure never cancels the rest.

use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use uuid::Uuid;

use keepsake_core::gallery;

use crate::api::{ApiClient, ClientError, UploadResult};

// ---------------------------------------------------------------------------
// Uploader seam
// ---------------------------------------------------------------------------

/// Anything that can push one photo to the gallery upload endpoint.
#[async_trait]
pub trait PhotoUploader: Sync {
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResult, ClientError>;
}

#[async_trait]
impl PhotoUploader for ApiClient {
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResult, ClientError> {
        self.upload_photo(filename, content_type, bytes).await
    }
}

// ---------------------------------------------------------------------------
// Queue state
// ---------------------------------------------------------------------------

/// Lifecycle of one queued file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    /// Picked but not yet validated.
    Selected,
    /// Validation in progress.
    Validating,
    /// Validation refused the file; it will never be dispatched.
    Rejected(String),
    /// Valid and waiting for dispatch.
    Previewing,
    /// Request in flight.
    Uploading,
    /// Stored and recorded.
    Uploaded,
    /// Dispatch failed; kept in place for manual retry.
    Failed(String),
}

/// A file in the upload queue.
#[derive(Debug, Clone)]
pub struct QueuedFile {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub state: UploadState,
}

/// A file as picked by the visitor, before validation.
#[derive(Debug, Clone)]
pub struct PendingFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// What a dispatch round amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing was in the previewing state.
    NothingToUpload,
    /// Every dispatched file succeeded; the modal closed itself.
    Completed { uploaded: usize },
    /// Some succeeded, some failed; the modal stays open for retry.
    PartialFailure { uploaded: usize, failed: usize },
    /// Every dispatched file failed.
    AllFailed { failed: usize },
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

/// Client-side queue of pending gallery uploads.
#[derive(Debug, Default)]
pub struct UploadCoordinator {
    files: Vec<QueuedFile>,
    open: bool,
    uploading: bool,
    error: Option<String>,
}

impl UploadCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close and reset the modal. Refused while uploads are in flight.
    pub fn close(&mut self) {
        if self.uploading {
            return;
        }
        self.files.clear();
        self.error = None;
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn files(&self) -> &[QueuedFile] {
        &self.files
    }

    /// Consolidated error banner, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validate and enqueue picked files.
    ///
    /// Invalid files land in the queue as `Rejected` with their reason also
    /// joined into the error banner; valid files become `Previewing`.
    pub fn add_files(&mut self, picked: Vec<PendingFile>) {
        self.error = None;
        let mut problems: Vec<String> = Vec::new();

        for file in picked {
            let mut queued = QueuedFile {
                id: Uuid::new_v4(),
                filename: file.filename,
                content_type: file.content_type,
                bytes: file.bytes,
                state: UploadState::Selected,
            };

            queued.state = UploadState::Validating;
            queued.state =
                match gallery::validate_upload(&queued.content_type, queued.bytes.len() as u64) {
                    Ok(()) => UploadState::Previewing,
                    Err(err) => {
                        let reason = err.to_string();
                        problems.push(format!("\"{}\": {}", queued.filename, reason));
                        UploadState::Rejected(reason)
                    }
                };

            self.files.push(queued);
        }

        if !problems.is_empty() {
            self.error = Some(problems.join("\n"));
        }
    }

    /// Remove a queued file. Only possible before its upload starts -- there
    /// is no in-flight cancellation.
    pub fn remove(&mut self, id: Uuid) {
        self.files.retain(|f| {
            f.id != id
                || matches!(
                    f.state,
                    UploadState::Uploading | UploadState::Uploaded
                )
        });
    }

    /// Move failed entries back to `Previewing` so the next dispatch round
    /// picks them up. This is the manual retry; nothing retries on its own.
    pub fn reset_failed(&mut self) {
        for file in &mut self.files {
            if matches!(file.state, UploadState::Failed(_)) {
                file.state = UploadState::Previewing;
            }
        }
    }

    /// Dispatch every previewing file concurrently.
    ///
    /// Statuses update file-by-file as responses land. When at least one
    /// file succeeds `on_refresh` fires so the page can re-fetch the
    /// gallery; when none fail the coordinator also closes itself.
    pub async fn upload_all(
        &mut self,
        uploader: &impl PhotoUploader,
        on_refresh: &mut dyn FnMut(),
    ) -> Outcome {
        let dispatch: Vec<(Uuid, String, String, Vec<u8>)> = self
            .files
            .iter_mut()
            .filter(|f| f.state == UploadState::Previewing)
            .map(|f| {
                f.state = UploadState::Uploading;
                (f.id, f.filename.clone(), f.content_type.clone(), f.bytes.clone())
            })
            .collect();

        if dispatch.is_empty() {
            return Outcome::NothingToUpload;
        }

        self.uploading = true;
        self.error = None;

        let mut in_flight: FuturesUnordered<_> = dispatch
            .into_iter()
            .map(|(id, filename, content_type, bytes)| async move {
                let result = uploader.upload(&filename, &content_type, bytes).await;
                (id, result)
            })
            .collect();

        let mut uploaded = 0usize;
        let mut failed = 0usize;

        while let Some((id, result)) = in_flight.next().await {
            let Some(file) = self.files.iter_mut().find(|f| f.id == id) else {
                continue;
            };
            match result {
                Ok(_) => {
                    uploaded += 1;
                    file.state = UploadState::Uploaded;
                }
                Err(err) => {
                    failed += 1;
                    tracing::warn!(filename = %file.filename, error = %err, "Photo upload failed");
                    file.state = UploadState::Failed(err.to_string());
                }
            }
        }

        self.uploading = false;

        // Uploaded entries leave the queue; failed ones stay for retry.
        self.files.retain(|f| f.state != UploadState::Uploaded);

        if uploaded > 0 {
            on_refresh();
        }

        if failed == 0 {
            self.open = false;
            Outcome::Completed { uploaded }
        } else {
            self.error = Some(format!(
                "{failed} photo(s) failed to upload. {uploaded} photo(s) uploaded successfully."
            ));
            if uploaded > 0 {
                Outcome::PartialFailure { uploaded, failed }
            } else {
                Outcome::AllFailed { failed }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
