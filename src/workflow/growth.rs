// src/workflow/growth.rs
use super::{Backend, Workflow, WorkflowState};
use crate::api::GrowthAnalytics;
use crate::state::notifications::Notifications;

#[derive(Default)]
pub struct GrowthInsightsController {
    workflow: Workflow<GrowthAnalytics>,
    insights: Option<GrowthAnalytics>,
}

impl GrowthInsightsController {
    pub fn insights(&self) -> Option<&GrowthAnalytics> {
        self.insights.as_ref()
    }

    pub fn state(&self) -> WorkflowState {
        self.workflow.state()
    }

    pub fn trigger_enabled(&self) -> bool {
        self.workflow.trigger_enabled()
    }

    pub fn is_busy(&self) -> bool {
        self.workflow.is_busy()
    }

    pub fn generate(&mut self, backend: &Backend) -> bool {
        let started = self
            .workflow
            .start(|| backend.request(|api| async move { api.growth_analytics().await }));
        if started {
            tracing::info!("Generating growth insights");
        }
        started
    }

    pub fn poll(&mut self, notes: &mut Notifications) {
        match self.workflow.poll() {
            Some(Ok(insights)) => {
                tracing::info!(
                    "Growth insights ready ({} recommendations, {} anomalies)",
                    insights.recommendations.as_ref().map_or(0, Vec::len),
                    insights.anomalies.as_ref().map_or(0, Vec::len)
                );
                self.insights = Some(insights);
            }
            Some(Err(e)) => {
                tracing::warn!("Growth insights failed: {}", e);
                notes.error(e.user_message("Error generating growth insights. Please try again."));
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::api::{ApiError, DataQuality};
    use crate::workflow::testing::*;

    #[tokio::test]
    async fn test_insights_stored_on_success() {
        let (backend, _) = backend(MockApi {
            growth: Some(Ok(GrowthAnalytics {
                data_quality: Some(DataQuality {
                    quality_score: 94.0,
                    total_rows: Some(100),
                    missing_values: Some(3),
                    duplicates: Some(1),
                    zero_prices: Some(2),
                    negative_quantities: Some(0),
                }),
                ..Default::default()
            })),
            ..Default::default()
        });
        let mut growth = GrowthInsightsController::default();
        let mut notes = Notifications::default();

        assert!(growth.generate(&backend));
        assert!(!growth.trigger_enabled());
        settle(|| {
            growth.poll(&mut notes);
            !growth.is_busy()
        })
        .await;

        assert_eq!(growth.state(), WorkflowState::Ready);
        assert_eq!(growth.insights().unwrap().data_quality.as_ref().unwrap().quality_score, 94.0);
        assert!(notes.is_empty());
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_insights() {
        let (ok_backend, _) = backend(MockApi {
            growth: Some(Ok(GrowthAnalytics::default())),
            ..Default::default()
        });
        let (failing_backend, _) = backend(MockApi {
            growth: Some(Err(ApiError::Status(500))),
            ..Default::default()
        });
        let mut growth = GrowthInsightsController::default();
        let mut notes = Notifications::default();

        growth.generate(&ok_backend);
        settle(|| {
            growth.poll(&mut notes);
            !growth.is_busy()
        })
        .await;
        growth.generate(&failing_backend);
        settle(|| {
            growth.poll(&mut notes);
            !growth.is_busy()
        })
        .await;

        assert_eq!(growth.state(), WorkflowState::Error);
        assert!(growth.insights().is_some());
        assert!(growth.trigger_enabled());
        assert_eq!(
            notes.latest().unwrap().message,
            "Error generating growth insights. Please try again."
        );
    }
}
