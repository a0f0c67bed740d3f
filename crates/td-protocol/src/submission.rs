use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::intent::ParsedIntent;

/// Request body sent to the external create-intent endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentSubmission {
    /// Unique submission ID (UUIDv7 for time-sortability).
    pub id: Uuid,
    /// Original operator text the intent was parsed from.
    pub text: String,
    /// Validated intent.
    pub intent: ParsedIntent,
    /// Who submitted the intent.
    pub submitted_by: String,
    /// When the submission was created.
    pub created_at: DateTime<Utc>,
}

impl IntentSubmission {
    pub fn new(
        text: impl Into<String>,
        intent: ParsedIntent,
        submitted_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: text.into(),
            intent,
            submitted_by: submitted_by.into(),
            created_at: Utc::now(),
        }
    }
}

/// Where a submission stands relative to the external backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Accepted locally, no backend configured to forward to.
    Pending,
    /// Backend acknowledged the intent.
    Forwarded,
    /// Backend rejected the intent or could not be reached.
    Failed,
}

/// Acknowledgement returned by the backend for a created intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendReceipt {
    /// Backend-side identifier for the created intent.
    pub id: String,
    /// Backend-side status label (e.g. "queued").
    #[serde(default)]
    pub status: String,
}
