// src/state/mod.rs
use crate::config::Settings;
use crate::file::snapshot::RecommendationSnapshot;
use crate::workflow::advanced::Recipients;
use crate::workflow::*;

pub mod notifications;

use notifications::Notifications;

// Screen/tab tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Upload,
    Report,
    Growth,
    Advanced,
    Chat,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Upload,
        Screen::Report,
        Screen::Growth,
        Screen::Advanced,
        Screen::Chat,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Upload => "Upload",
            Screen::Report => "Report",
            Screen::Growth => "Growth Insights",
            Screen::Advanced => "Advanced Analytics",
            Screen::Chat => "Ask Your Data",
        }
    }
}

// Modal windows on top of the current screen
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    None,
    Investigate { product: String },
    SavedRecommendations(RecommendationSnapshot),
}

// Text the user is still typing
#[derive(Debug, Default)]
pub struct Drafts {
    pub email: String,
    pub question: String,
}

// Core application state
pub struct AppState {
    pub backend: Backend,
    pub settings: Settings,
    pub current_screen: Screen,
    pub modal: Modal,
    pub drafts: Drafts,
    pub notifications: Notifications,

    pub upload: UploadController,
    pub report: ReportController,
    pub growth: GrowthInsightsController,
    pub advanced: AdvancedAnalyticsController,
    pub chat: ChatController,
}

impl AppState {
    pub fn new(settings: Settings, backend: Backend) -> Self {
        Self {
            advanced: AdvancedAnalyticsController::new(Recipients::from_settings(&settings)),
            backend,
            settings,
            current_screen: Screen::Upload,
            modal: Modal::None,
            drafts: Drafts::default(),
            notifications: Notifications::default(),
            upload: UploadController::default(),
            report: ReportController::default(),
            growth: GrowthInsightsController::default(),
            chat: ChatController::default(),
        }
    }

    /// Collects finished requests. Called once per frame before drawing.
    pub fn poll(&mut self) {
        self.upload.poll(&mut self.notifications);
        self.report.poll(&mut self.notifications);
        self.growth.poll(&mut self.notifications);
        self.advanced.poll(&mut self.notifications);
        self.chat.poll();
    }

    pub fn is_busy(&self) -> bool {
        self.upload.is_busy()
            || self.report.is_busy()
            || self.growth.is_busy()
            || self.advanced.is_busy()
            || self.chat.is_busy()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::mock::{sample_report, MockApi};
    use crate::workflow::testing::{backend, settle};
    use std::sync::Arc;

    pub fn state_with(api: MockApi) -> (AppState, Arc<MockApi>) {
        let (backend, api) = backend(api);
        (AppState::new(Settings::default(), backend), api)
    }

    #[tokio::test]
    async fn test_controllers_run_independently() {
        let (mut state, api) = state_with(MockApi {
            report: Some(Ok(sample_report())),
            ..Default::default()
        });

        assert!(state.report.generate(&state.backend));
        assert!(state.growth.generate(&state.backend));
        assert!(state.is_busy());

        settle(|| {
            state.poll();
            !state.is_busy()
        })
        .await;

        assert!(state.report.report().is_some());
        assert!(state.growth.insights().is_none());
        assert_eq!(api.calls().len(), 2);
        assert_eq!(state.notifications.len(), 1);
    }

    #[test]
    fn test_screen_labels_are_distinct() {
        let labels: std::collections::HashSet<_> = Screen::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels.len(), Screen::ALL.len());
    }
}
