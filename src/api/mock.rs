// src/api/mock.rs
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::models::*;
use super::{AnalyticsApi, ApiError, ApiResult};
use crate::file::StagedFile;

/// In-memory service with canned answers. Unset answers fail as transport
/// errors. With a `gate`, every call waits for `gate.notify_one()` first.
#[derive(Default)]
pub struct MockApi {
    pub upload: Option<ApiResult<()>>,
    pub report: Option<ApiResult<Report>>,
    pub pdf: Option<ApiResult<Vec<u8>>>,
    pub receipt: Option<ApiResult<DeliveryReceipt>>,
    pub growth: Option<ApiResult<GrowthAnalytics>>,
    pub advanced: Option<ApiResult<AdvancedAnalytics>>,
    pub reply: Option<ApiResult<ChatReply>>,
    pub gate: Option<Arc<Notify>>,
    pub calls: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn answer<T: Clone>(&self, call: String, slot: &Option<ApiResult<T>>) -> ApiResult<T> {
        self.calls.lock().unwrap().push(call);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        slot.clone()
            .unwrap_or_else(|| Err(ApiError::Transport("connection refused".to_string())))
    }
}

#[async_trait]
impl AnalyticsApi for MockApi {
    async fn upload(&self, file: &StagedFile) -> ApiResult<()> {
        self.answer(format!("upload {}", file.name), &self.upload).await
    }

    async fn report(&self) -> ApiResult<Report> {
        self.answer("report".into(), &self.report).await
    }

    async fn download_report(&self) -> ApiResult<Vec<u8>> {
        self.answer("download-report".into(), &self.pdf).await
    }

    async fn email_report(&self, email: &str) -> ApiResult<DeliveryReceipt> {
        self.answer(format!("email-report {}", email), &self.receipt).await
    }

    async fn growth_analytics(&self) -> ApiResult<GrowthAnalytics> {
        self.answer("growth-analytics".into(), &self.growth).await
    }

    async fn advanced_analytics(&self) -> ApiResult<AdvancedAnalytics> {
        self.answer("advanced-analytics".into(), &self.advanced).await
    }

    async fn send_report(&self, method: DeliveryChannel, recipient: &str) -> ApiResult<DeliveryReceipt> {
        self.answer(format!("send-report {:?} {}", method, recipient), &self.receipt)
            .await
    }

    async fn explore(&self, question: &str) -> ApiResult<ChatReply> {
        self.answer(format!("explore {}", question), &self.reply).await
    }
}

pub fn sample_report() -> Report {
    Report {
        report: ReportSummary {
            title: "Sales Performance Analysis".into(),
            summary: "Analysis of 250 sales records".into(),
            total_revenue: "$12,400.00".into(),
            top_product: "Laptop".into(),
            data_quality: "Good".into(),
        },
        insights: vec!["Your dataset contains 250 sales transactions".into()],
        personalized: vec!["Customer segmentation could reveal valuable insights".into()],
        cleaning: CleaningCounts {
            missing_values: 2,
            duplicates: 1,
            outliers: 3,
        },
    }
}
