// src/api/client.rs
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::models::*;
use super::{decode_body, AnalyticsApi, ApiError, ApiResult};
use crate::config::Settings;
use crate::file::StagedFile;

const UPLOAD: &str = "upload";
const REPORT: &str = "report";
const DOWNLOAD_REPORT: &str = "download-report";
const EMAIL_REPORT: &str = "email-report";
const GROWTH_ANALYTICS: &str = "growth-analytics";
const ADVANCED_ANALYTICS: &str = "advanced-analytics";
const SEND_REPORT: &str = "send-report";
const EXPLORE: &str = "explore";

/// HTTP client for the analytics service.
///
/// The service remembers the uploaded dataset through its session cookie, so
/// one client (and one cookie jar) is shared by every workflow.
pub struct HttpAnalyticsApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpAnalyticsApi {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&settings.base_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Transport(format!("Invalid endpoint {}: {}", path, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {}", url);
        let response = self.client.post(url).json(body).send().await?;
        read_json(response).await
    }
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw).with_context(|| format!("Invalid service URL: {}", raw))
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    let status = response.status().as_u16();
    let body = response.text().await?;
    decode_body(status, &body)
}

#[async_trait]
impl AnalyticsApi for HttpAnalyticsApi {
    async fn upload(&self, file: &StagedFile) -> ApiResult<()> {
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| ApiError::Transport(format!("Could not read {}: {}", file.name, e)))?;
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file.name.clone()));

        let response = self
            .client
            .post(self.endpoint(UPLOAD)?)
            .multipart(form)
            .send()
            .await?;

        // The service answers an upload with a redirect to its own dashboard page.
        let status = response.status();
        if status.is_success() || status.is_redirection() {
            Ok(())
        } else {
            Err(ApiError::Status(status.as_u16()))
        }
    }

    async fn report(&self) -> ApiResult<Report> {
        self.get_json(REPORT).await
    }

    async fn download_report(&self) -> ApiResult<Vec<u8>> {
        let response = self.client.get(self.endpoint(DOWNLOAD_REPORT)?).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }

    async fn email_report(&self, email: &str) -> ApiResult<DeliveryReceipt> {
        self.post_json(EMAIL_REPORT, &EmailRequest { email }).await
    }

    async fn growth_analytics(&self) -> ApiResult<GrowthAnalytics> {
        self.get_json(GROWTH_ANALYTICS).await
    }

    async fn advanced_analytics(&self) -> ApiResult<AdvancedAnalytics> {
        self.get_json(ADVANCED_ANALYTICS).await
    }

    async fn send_report(&self, method: DeliveryChannel, recipient: &str) -> ApiResult<DeliveryReceipt> {
        self.post_json(SEND_REPORT, &SendReportRequest { method, recipient })
            .await
    }

    async fn explore(&self, question: &str) -> ApiResult<ChatReply> {
        self.post_json(EXPLORE, &ExploreRequest { question }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let base = normalize_base_url("http://analytics.local:5000/app").unwrap();
        assert_eq!(base.join(REPORT).unwrap().as_str(), "http://analytics.local:5000/app/report");
    }

    #[test]
    fn test_base_url_rejects_garbage() {
        assert!(normalize_base_url("not a url").is_err());
    }

    #[test]
    fn test_client_builds_from_default_settings() {
        let api = HttpAnalyticsApi::new(&Settings::default()).unwrap();
        assert_eq!(
            api.endpoint(GROWTH_ANALYTICS).unwrap().as_str(),
            "http://127.0.0.1:5000/growth-analytics"
        );
    }
}
