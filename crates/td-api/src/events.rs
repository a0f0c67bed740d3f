//! Real-time event types broadcast over WebSocket connections.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use td_protocol::{IntentKind, SubmissionStatus};

/// Server-sent events pushed to WebSocket clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsEvent {
    /// Text was parsed into an intent (preview only, nothing submitted).
    IntentParsed {
        kind: IntentKind,
        summary: String,
        timestamp: DateTime<Utc>,
    },

    /// Text was rejected by the parser.
    IntentRejected {
        error: String,
        timestamp: DateTime<Utc>,
    },

    /// A validated intent was recorded (and forwarded, if a backend is set).
    IntentSubmitted {
        id: Uuid,
        kind: IntentKind,
        summary: String,
        status: SubmissionStatus,
        submitted_by: String,
        created_at: DateTime<Utc>,
    },
}
