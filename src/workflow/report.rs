// src/workflow/report.rs
use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use super::{Backend, Workflow, WorkflowState};
use crate::api::{DeliveryReceipt, Report};
use crate::state::notifications::Notifications;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Please enter a valid email address.")]
    InvalidAddress,
    #[error("Generate a report before emailing it.")]
    NoReport,
    #[error("An email is already being sent.")]
    Busy,
}

pub fn is_valid_email(address: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
        .is_match(address.trim())
}

#[derive(Default)]
pub struct ReportController {
    generation: Workflow<Report>,
    email: Workflow<DeliveryReceipt>,
    report: Option<Report>,
}

impl ReportController {
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn state(&self) -> WorkflowState {
        self.generation.state()
    }

    pub fn trigger_enabled(&self) -> bool {
        self.generation.trigger_enabled()
    }

    /// Export and email only have a target once a report exists.
    pub fn actions_available(&self) -> bool {
        self.report.is_some()
    }

    pub fn email_enabled(&self) -> bool {
        self.actions_available() && self.email.trigger_enabled()
    }

    pub fn generate(&mut self, backend: &Backend) -> bool {
        let started = self
            .generation
            .start(|| backend.request(|api| async move { api.report().await }));
        if started {
            tracing::info!("Generating report");
        }
        started
    }

    /// Fire-and-forget: the download is reported as started, never as done.
    pub fn export_pdf(&self, backend: &Backend, destination: PathBuf, notes: &mut Notifications) -> bool {
        if !self.actions_available() {
            return false;
        }

        backend.detach(move |api| async move {
            match api.download_report().await {
                Ok(bytes) => match tokio::fs::write(&destination, &bytes).await {
                    Ok(()) => tracing::info!(
                        "Saved report PDF to {} ({} bytes)",
                        destination.display(),
                        bytes.len()
                    ),
                    Err(e) => tracing::warn!("Could not write {}: {}", destination.display(), e),
                },
                Err(e) => tracing::warn!("Report download failed: {}", e),
            }
        });
        notes.info("PDF download started.");
        true
    }

    pub fn email_report(
        &mut self,
        address: &str,
        backend: &Backend,
        notes: &mut Notifications,
    ) -> Result<(), EmailError> {
        let outcome = self.start_email(address, backend);
        if let Err(e) = &outcome {
            notes.error(e.to_string());
        }
        outcome
    }

    fn start_email(&mut self, address: &str, backend: &Backend) -> Result<(), EmailError> {
        if !self.actions_available() {
            return Err(EmailError::NoReport);
        }
        if !is_valid_email(address) {
            return Err(EmailError::InvalidAddress);
        }

        let address = address.trim().to_string();
        let started = self.email.start(|| {
            backend.request(move |api| async move { api.email_report(&address).await })
        });
        if started {
            Ok(())
        } else {
            Err(EmailError::Busy)
        }
    }

    pub fn poll(&mut self, notes: &mut Notifications) {
        match self.generation.poll() {
            Some(Ok(report)) => {
                tracing::info!("Report ready: {}", report.report.title);
                self.report = Some(report);
            }
            Some(Err(e)) => {
                tracing::warn!("Report generation failed: {}", e);
                notes.error(e.user_message("Error generating report. Please try again."));
            }
            None => {}
        }

        match self.email.poll() {
            Some(Ok(DeliveryReceipt { success: true, message })) => {
                notes.success(if message.is_empty() { "Report emailed.".to_string() } else { message });
            }
            Some(Ok(DeliveryReceipt { success: false, message })) => {
                notes.error(message);
            }
            Some(Err(e)) => {
                tracing::warn!("Emailing report failed: {}", e);
                notes.error(e.user_message("Failed to send email. Please try again."));
            }
            None => {}
        }
    }

    pub fn is_busy(&self) -> bool {
        self.generation.is_busy() || self.email.is_busy()
    }
}
