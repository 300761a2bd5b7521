// src/api/mod.rs
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::file::StagedFile;

pub mod client;
pub mod models;
#[cfg(test)]
pub mod mock;

pub use client::HttpAnalyticsApi;
pub use models::*;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a usable response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The service answered with an `{error}` body.
    #[error("{0}")]
    Remote(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Server returned status {0}")]
    Status(u16),
}

impl ApiError {
    /// Remote messages are shown verbatim; anything else gets the caller's wording.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Remote(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// The remote analytics service, as seen by the workflow controllers.
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    async fn upload(&self, file: &StagedFile) -> ApiResult<()>;
    async fn report(&self) -> ApiResult<Report>;
    async fn download_report(&self) -> ApiResult<Vec<u8>>;
    async fn email_report(&self, email: &str) -> ApiResult<DeliveryReceipt>;
    async fn growth_analytics(&self) -> ApiResult<GrowthAnalytics>;
    async fn advanced_analytics(&self) -> ApiResult<AdvancedAnalytics>;
    async fn send_report(&self, method: DeliveryChannel, recipient: &str) -> ApiResult<DeliveryReceipt>;
    async fn explore(&self, question: &str) -> ApiResult<ChatReply>;
}

/// Interprets a response body. An `error` field wins over the HTTP status,
/// since the service reports most failures that way.
pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<T> {
    let success = (200..300).contains(&status);
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) if success => return Err(ApiError::Decode(e.to_string())),
        Err(_) => return Err(ApiError::Status(status)),
    };

    if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
        return Err(ApiError::Remote(message.to_string()));
    }
    if !success {
        return Err(ApiError::Status(status));
    }

    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_field_is_remote_error_even_on_400() {
        let result: ApiResult<Report> = decode_body(400, r#"{"error": "No data available"}"#);
        assert_eq!(result, Err(ApiError::Remote("No data available".to_string())));
    }

    #[test]
    fn test_html_error_page_is_status_error() {
        let result: ApiResult<ChatReply> = decode_body(500, "<html>oops</html>");
        assert_eq!(result, Err(ApiError::Status(500)));
    }

    #[test]
    fn test_garbage_on_success_is_decode_error() {
        let result: ApiResult<ChatReply> = decode_body(200, "not json");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_chat_reply_without_suggestions() {
        let reply: ChatReply = decode_body(200, r#"{"question": "hi", "response": "Hello"}"#).unwrap();
        assert_eq!(reply.response, "Hello");
        assert!(reply.suggestions.is_none());
    }

    #[test]
    fn test_user_message_keeps_remote_text() {
        assert_eq!(
            ApiError::Remote("SMTP not configured".into()).user_message("Failed to send email."),
            "SMTP not configured"
        );
        assert_eq!(
            ApiError::Status(502).user_message("Failed to send email."),
            "Failed to send email."
        );
    }
}
