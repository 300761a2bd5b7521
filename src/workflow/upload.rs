// src/workflow/upload.rs
use super::{Backend, Workflow, WorkflowState};
use crate::file::{FileCandidate, StagedFile, StagedFileError};
use crate::state::notifications::Notifications;

#[derive(Default)]
pub struct UploadController {
    staged: Option<StagedFile>,
    submission: Workflow<()>,
}

impl UploadController {
    pub fn staged(&self) -> Option<&StagedFile> {
        self.staged.as_ref()
    }

    pub fn state(&self) -> WorkflowState {
        self.submission.state()
    }

    pub fn submit_enabled(&self) -> bool {
        self.staged.is_some() && self.submission.trigger_enabled()
    }

    /// A rejected candidate leaves the previously staged file in place.
    pub fn select(
        &mut self,
        candidate: FileCandidate,
        notes: &mut Notifications,
    ) -> Result<(), StagedFileError> {
        match StagedFile::validate(candidate) {
            Ok(staged) => {
                tracing::info!("Staged {} ({} bytes)", staged.name, staged.size_bytes);
                self.staged = Some(staged);
                Ok(())
            }
            Err(e) => {
                notes.error(e.to_string());
                Err(e)
            }
        }
    }

    pub fn submit(&mut self, backend: &Backend) -> bool {
        let Some(staged) = self.staged.clone() else {
            return false;
        };

        let started = self.submission.start(|| {
            backend.request(move |api| async move { api.upload(&staged).await })
        });
        if started {
            tracing::info!("Uploading staged file");
        }
        started
    }

    pub fn poll(&mut self, notes: &mut Notifications) {
        match self.submission.poll() {
            Some(Ok(())) => {
                notes.success("File uploaded successfully!");
            }
            Some(Err(e)) => {
                tracing::warn!("Upload failed: {}", e);
                notes.error(e.user_message("Error uploading file. Please try again."));
            }
            None => {}
        }
    }

    pub fn is_busy(&self) -> bool {
        self.submission.is_busy()
    }
}
