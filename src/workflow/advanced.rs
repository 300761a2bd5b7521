// src/workflow/advanced.rs
use super::{Backend, Workflow, WorkflowState};
use crate::api::*;
use crate::config::Settings;
use crate::state::notifications::Notifications;

pub const DEMO_NOTICE: &str = "Analytics service unavailable. Showing demo data.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Demo,
}

/// Fixed placeholder recipients for report delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipients {
    pub email: String,
    pub chat_channel: String,
}

impl Recipients {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            email: settings.email_recipient.clone(),
            chat_channel: settings.chat_channel_recipient.clone(),
        }
    }

    pub fn for_channel(&self, channel: DeliveryChannel) -> &str {
        match channel {
            DeliveryChannel::Email => &self.email,
            DeliveryChannel::ChatChannel => &self.chat_channel,
        }
    }
}

impl Default for Recipients {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[derive(Default)]
pub struct AdvancedAnalyticsController {
    workflow: Workflow<AdvancedAnalytics>,
    delivery: Workflow<DeliveryReceipt>,
    analytics: Option<(AdvancedAnalytics, DataSource)>,
    recipients: Recipients,
}

impl AdvancedAnalyticsController {
    pub fn new(recipients: Recipients) -> Self {
        Self {
            recipients,
            ..Default::default()
        }
    }

    pub fn analytics(&self) -> Option<&AdvancedAnalytics> {
        self.analytics.as_ref().map(|(analytics, _)| analytics)
    }

    pub fn source(&self) -> Option<DataSource> {
        self.analytics.as_ref().map(|(_, source)| *source)
    }

    pub fn state(&self) -> WorkflowState {
        self.workflow.state()
    }

    pub fn trigger_enabled(&self) -> bool {
        self.workflow.trigger_enabled()
    }

    pub fn delivery_available(&self) -> bool {
        self.analytics.is_some()
    }

    pub fn delivery_enabled(&self) -> bool {
        self.delivery_available() && self.delivery.trigger_enabled()
    }

    pub fn is_busy(&self) -> bool {
        self.workflow.is_busy() || self.delivery.is_busy()
    }

    pub fn generate(&mut self, backend: &Backend) -> bool {
        let started = self
            .workflow
            .start(|| backend.request(|api| async move { api.advanced_analytics().await }));
        if started {
            tracing::info!("Generating advanced analytics");
        }
        started
    }

    pub fn send_report(&mut self, channel: DeliveryChannel, backend: &Backend) -> bool {
        if !self.delivery_available() {
            return false;
        }

        let recipient = self.recipients.for_channel(channel).to_string();
        let started = self.delivery.start(|| {
            backend.request(move |api| async move { api.send_report(channel, &recipient).await })
        });
        if started {
            tracing::info!("Sending analytics report via {:?}", channel);
        }
        started
    }

    pub fn poll(&mut self, notes: &mut Notifications) {
        match self.workflow.poll() {
            Some(Ok(analytics)) => {
                tracing::info!("Advanced analytics ready");
                self.analytics = Some((analytics, DataSource::Live));
            }
            Some(Err(e)) => {
                tracing::warn!("Advanced analytics failed, falling back to demo data: {}", e);
                self.analytics = Some((demo_dataset(), DataSource::Demo));
                self.workflow.recover();
                notes.info(DEMO_NOTICE);
            }
            None => {}
        }

        match self.delivery.poll() {
            Some(Ok(DeliveryReceipt { success: true, message })) => {
                notes.success(message);
            }
            Some(Ok(DeliveryReceipt { success: false, message })) => {
                notes.error(message);
            }
            Some(Err(e)) => {
                tracing::warn!("Sending report failed: {}", e);
                notes.error(e.user_message("Failed to send report. Please try again."));
            }
            None => {}
        }
    }
}

/// Stand-in payload shown when the service cannot produce one. Same type as a
/// live response, so the views never need to tell them apart.
pub fn demo_dataset() -> AdvancedAnalytics {
    AdvancedAnalytics {
        data_health: Some(DataHealth {
            score: 87.0,
            comment: Some("Good data quality with minor issues".into()),
            color: Some("success".into()),
            issues: vec!["Some missing values: 2.3%".into()],
            stats: Some(HealthStats {
                total_rows: 150,
                total_columns: 4,
                missing_pct: 2.3,
                duplicate_pct: 0.0,
                outlier_pct: 4.1,
            }),
        }),
        growth_metrics: Some(GrowthMetrics {
            week_over_week: 12.5,
            month_over_month: 8.3,
            best_streak_value: Some(8450.0),
            best_streak_date: Some("2024-01-15".into()),
            sparkline_series: vec![
                800.0, 950.0, 1200.0, 1100.0, 1300.0, 1450.0, 1380.0, 1520.0, 1600.0, 1750.0,
                1680.0, 1820.0, 1950.0, 2100.0,
            ],
            current_revenue: Some(2100.0),
        }),
        customer_segmentation: Some(CustomerSegmentation {
            segments: vec![
                CustomerSegment {
                    name: "High Value".into(),
                    count: 25,
                    avg_revenue: 1250.0,
                    avg_frequency: 8.5,
                },
                CustomerSegment {
                    name: "Occasional".into(),
                    count: 45,
                    avg_revenue: 420.0,
                    avg_frequency: 3.2,
                },
                CustomerSegment {
                    name: "One-Time".into(),
                    count: 30,
                    avg_revenue: 89.0,
                    avg_frequency: 1.0,
                },
            ],
            sample_customers: vec![
                SampleCustomer {
                    customer: "Customer_001".into(),
                    total_revenue: 2400.0,
                    frequency: 12.0,
                    segment_name: Some("High Value".into()),
                },
                SampleCustomer {
                    customer: "Customer_002".into(),
                    total_revenue: 680.0,
                    frequency: 4.0,
                    segment_name: Some("Occasional".into()),
                },
                SampleCustomer {
                    customer: "Customer_003".into(),
                    total_revenue: 95.0,
                    frequency: 1.0,
                    segment_name: Some("One-Time".into()),
                },
            ],
            chart: None,
        }),
        forecast: Some(Forecast {
            summary: "Sales expected to grow by 8-12% over next 30 days".into(),
            growth_rate: Some(10.0),
            chart: None,
        }),
    }
}
