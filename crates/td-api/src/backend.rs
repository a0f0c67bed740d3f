//! Client for the external trade/intent-creation backend.
//!
//! Validated intents are forwarded as `IntentSubmission` JSON to
//! `POST {url}/intents`; the backend answers with a `BackendReceipt`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use td_protocol::{BackendReceipt, IntentSubmission};

/// Connection settings for the intent backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackendConfig {
    /// Base URL, e.g. "https://api.example.com/v1".
    pub url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

pub(crate) fn default_timeout_secs() -> u64 {
    10
}

impl BackendConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Errors talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Destination for validated intents.
#[async_trait]
pub trait IntentBackend: Send + Sync {
    /// Create the intent on the backend.
    async fn submit(&self, submission: &IntentSubmission) -> Result<BackendReceipt, BackendError>;

    /// Name of this backend (for logging).
    fn name(&self) -> &str;
}

/// HTTP implementation of `IntentBackend`.
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let endpoint = format!("{}/intents", config.url.trim_end_matches('/'));
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl IntentBackend for HttpBackend {
    async fn submit(&self, submission: &IntentSubmission) -> Result<BackendReceipt, BackendError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, submission_id = %submission.id, "backend rejected intent");
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let receipt: BackendReceipt = response.json().await?;
        tracing::info!(
            submission_id = %submission.id,
            backend_id = %receipt.id,
            "intent created on backend"
        );
        Ok(receipt)
    }

    fn name(&self) -> &str {
        "http"
    }
}
