// src/input/command.rs
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use rfd::FileDialog;

use crate::api::DeliveryChannel;
use crate::file::{default_download_path, FileCandidate, RecommendationSnapshot, ALLOWED_EXTENSIONS};
use crate::state::{AppState, Modal, Screen};
use crate::ui::growth::recommendations_markup;

pub const REPORT_FILE_NAME: &str = "sales_report.pdf";

/// Everything an interactive element can ask for. Views only emit these;
/// `execute` is the one place they are acted on.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SwitchScreen(Screen),
    DismissNotification(u64),
    CloseModal,

    PickFile,
    SelectFile(PathBuf),
    SubmitUpload,

    GenerateReport,
    ExportPdf,
    ExportPdfTo(PathBuf),
    EmailReport,

    GenerateGrowth,
    InvestigateAnomaly { product: String },
    SaveRecommendations,
    RecallRecommendations,

    GenerateAdvanced,
    SendReport(DeliveryChannel),

    SubmitQuestion,
    AskSuggestion(String),
}

impl Command {
    /// `storage` has the shape `eframe::Frame::storage_mut` hands out.
    pub fn execute(
        self,
        state: &mut AppState,
        storage: Option<&mut (dyn eframe::Storage + 'static)>,
    ) -> Result<()> {
        match self {
            Command::SwitchScreen(screen) => {
                state.current_screen = screen;
            }
            Command::DismissNotification(id) => {
                state.notifications.dismiss(id);
            }
            Command::CloseModal => {
                state.modal = Modal::None;
            }

            Command::PickFile => {
                let picked = FileDialog::new()
                    .add_filter("Sales data", &ALLOWED_EXTENSIONS)
                    .set_title("Select Sales Data")
                    .pick_file();
                if let Some(path) = picked {
                    return Command::SelectFile(path).execute(state, storage);
                }
            }
            Command::SelectFile(path) => {
                let candidate = FileCandidate::from_path(&path)?;
                // Rejections are already shown as notifications
                let _ = state.upload.select(candidate, &mut state.notifications);
            }
            Command::SubmitUpload => {
                state.upload.submit(&state.backend);
            }

            Command::GenerateReport => {
                state.report.generate(&state.backend);
            }
            Command::ExportPdf => {
                let destination = FileDialog::new()
                    .add_filter("PDF", &["pdf"])
                    .set_title("Save Report")
                    .set_file_name(REPORT_FILE_NAME)
                    .save_file()
                    .unwrap_or_else(|| default_download_path(REPORT_FILE_NAME));
                return Command::ExportPdfTo(destination).execute(state, storage);
            }
            Command::ExportPdfTo(destination) => {
                state
                    .report
                    .export_pdf(&state.backend, destination, &mut state.notifications);
            }
            Command::EmailReport => {
                let sent = state.report.email_report(
                    &state.drafts.email,
                    &state.backend,
                    &mut state.notifications,
                );
                if sent.is_ok() {
                    state.drafts.email.clear();
                }
            }

            Command::GenerateGrowth => {
                state.growth.generate(&state.backend);
            }
            Command::InvestigateAnomaly { product } => {
                state.modal = Modal::Investigate { product };
            }
            Command::SaveRecommendations => {
                let storage = storage.ok_or_else(|| anyhow!("Local storage is not available"))?;
                let recommendations = state
                    .growth
                    .insights()
                    .and_then(|insights| insights.recommendations.as_deref())
                    .unwrap_or_default();
                if recommendations.is_empty() {
                    state.notifications.info("No recommendations to save yet.");
                    return Ok(());
                }
                RecommendationSnapshot::capture(recommendations_markup(recommendations)).store(storage);
                state.notifications.success("Recommendations saved.");
            }
            Command::RecallRecommendations => {
                let storage = storage.ok_or_else(|| anyhow!("Local storage is not available"))?;
                match RecommendationSnapshot::load(storage) {
                    Some(snapshot) => state.modal = Modal::SavedRecommendations(snapshot),
                    None => {
                        state.notifications.info("No saved recommendations found.");
                    }
                }
            }

            Command::GenerateAdvanced => {
                state.advanced.generate(&state.backend);
            }
            Command::SendReport(channel) => {
                state.advanced.send_report(channel, &state.backend);
            }

            Command::SubmitQuestion => {
                if state.chat.submit(&state.drafts.question, &state.backend) {
                    state.drafts.question.clear();
                }
            }
            Command::AskSuggestion(question) => {
                state.chat.submit(&question, &state.backend);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{sample_report, MockApi};
    use crate::api::{DeliveryReceipt, GrowthAnalytics, Impact, Recommendation};
    use crate::file::snapshot::tests::MemoryStorage;
    use crate::file::snapshot::SNAPSHOT_KEY;
    use crate::state::tests::state_with;
    use crate::workflow::testing::{settle, spin};

    fn growth_with_recommendations() -> GrowthAnalytics {
        GrowthAnalytics {
            recommendations: Some(vec![Recommendation {
                title: "Restock Laptops".into(),
                body: "Laptop sales outpace inventory.".into(),
                impact: Impact::High,
                icon: Some("📦".into()),
            }]),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_select_file_stages_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Orders.CSV");
        std::fs::write(&path, "date,product,revenue\n").unwrap();
        let (mut state, _) = state_with(MockApi::default());

        Command::SelectFile(path).execute(&mut state, None).unwrap();

        let staged = state.upload.staged().unwrap();
        assert_eq!(staged.name, "Orders.CSV");
        assert_eq!(staged.extension, "csv");
        assert_eq!(staged.size_bytes, 21);
    }

    #[tokio::test]
    async fn test_select_missing_file_is_an_error() {
        let (mut state, _) = state_with(MockApi::default());
        let result = Command::SelectFile(PathBuf::from("/definitely/not/here.csv")).execute(&mut state, None);
        assert!(result.is_err());
        assert!(state.upload.staged().is_none());
    }

    #[tokio::test]
    async fn test_email_draft_cleared_only_when_sent() {
        let (mut state, _) = state_with(MockApi {
            report: Some(Ok(sample_report())),
            receipt: Some(Ok(DeliveryReceipt { success: true, message: "Sent".into() })),
            ..Default::default()
        });
        Command::GenerateReport.execute(&mut state, None).unwrap();
        settle(|| {
            state.poll();
            !state.is_busy()
        })
        .await;

        state.drafts.email = "not an email".into();
        Command::EmailReport.execute(&mut state, None).unwrap();
        assert_eq!(state.drafts.email, "not an email");

        state.drafts.email = "ana@shop.io".into();
        Command::EmailReport.execute(&mut state, None).unwrap();
        assert!(state.drafts.email.is_empty());
    }

    #[tokio::test]
    async fn test_investigate_opens_modal_and_close_clears_it() {
        let (mut state, _) = state_with(MockApi::default());
        Command::InvestigateAnomaly { product: "Desk Lamp".into() }
            .execute(&mut state, None)
            .unwrap();
        assert_eq!(state.modal, Modal::Investigate { product: "Desk Lamp".into() });

        Command::CloseModal.execute(&mut state, None).unwrap();
        assert_eq!(state.modal, Modal::None);
    }

    #[tokio::test]
    async fn test_save_and_recall_recommendations() {
        let (mut state, _) = state_with(MockApi {
            growth: Some(Ok(growth_with_recommendations())),
            ..Default::default()
        });
        let mut storage = MemoryStorage::default();

        Command::RecallRecommendations.execute(&mut state, Some(&mut storage)).unwrap();
        assert_eq!(state.modal, Modal::None);

        Command::GenerateGrowth.execute(&mut state, None).unwrap();
        settle(|| {
            state.poll();
            !state.is_busy()
        })
        .await;

        Command::SaveRecommendations.execute(&mut state, Some(&mut storage)).unwrap();
        assert!(storage.values.contains_key(SNAPSHOT_KEY));

        Command::RecallRecommendations.execute(&mut state, Some(&mut storage)).unwrap();
        match &state.modal {
            Modal::SavedRecommendations(snapshot) => {
                assert!(snapshot.markup.contains("Restock Laptops"));
            }
            other => panic!("unexpected modal {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_save_without_storage_fails() {
        let (mut state, _) = state_with(MockApi::default());
        assert!(Command::SaveRecommendations.execute(&mut state, None).is_err());
    }

    struct FrameLike {
        storage: MemoryStorage,
    }

    impl FrameLike {
        // Same signature as `eframe::Frame::storage_mut`
        fn storage_mut(&mut self) -> Option<&mut (dyn eframe::Storage + 'static)> {
            Some(&mut self.storage)
        }
    }

    #[tokio::test]
    async fn test_commands_borrow_frame_storage_per_iteration() {
        let (mut state, _) = state_with(MockApi {
            growth: Some(Ok(growth_with_recommendations())),
            ..Default::default()
        });
        Command::GenerateGrowth.execute(&mut state, None).unwrap();
        settle(|| {
            state.poll();
            !state.is_busy()
        })
        .await;

        let mut frame = FrameLike { storage: MemoryStorage::default() };
        for command in [Command::SaveRecommendations, Command::RecallRecommendations] {
            command.execute(&mut state, frame.storage_mut()).unwrap();
        }

        assert!(frame.storage.values.contains_key(SNAPSHOT_KEY));
        assert!(matches!(state.modal, Modal::SavedRecommendations(_)));
    }

    #[tokio::test]
    async fn test_question_draft_cleared_after_submit() {
        let (mut state, api) = state_with(MockApi::default());

        state.drafts.question = "   ".into();
        Command::SubmitQuestion.execute(&mut state, None).unwrap();
        assert_eq!(state.drafts.question, "   ");
        assert!(state.chat.log().is_empty());

        state.drafts.question = "best month?".into();
        Command::SubmitQuestion.execute(&mut state, None).unwrap();
        assert!(state.drafts.question.is_empty());
        spin().await;
        assert_eq!(api.calls(), vec!["explore best month?".to_string()]);
    }

    #[tokio::test]
    async fn test_send_report_requires_analytics() {
        let (mut state, api) = state_with(MockApi::default());
        Command::SendReport(DeliveryChannel::Email).execute(&mut state, None).unwrap();
        spin().await;
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_switch_screen_and_dismiss() {
        let (mut state, _) = state_with(MockApi::default());
        let id = state.notifications.info("hello");

        Command::SwitchScreen(Screen::Chat).execute(&mut state, None).unwrap();
        Command::DismissNotification(id).execute(&mut state, None).unwrap();

        assert_eq!(state.current_screen, Screen::Chat);
        assert!(state.notifications.is_empty());
    }
}
