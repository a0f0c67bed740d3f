//! Shared application state for the Axum server.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{RwLock, broadcast};

use td_protocol::{BackendReceipt, IntentSubmission, SubmissionStatus};

use crate::backend::IntentBackend;
use crate::events::WsEvent;

/// Records kept in memory; the oldest are dropped beyond this.
pub const MAX_RECORDS: usize = 1_000;

/// Shared application state, cloned into every Axum handler.
#[derive(Clone)]
pub struct AppState {
    /// Recent submissions, oldest first.
    pub intents: Arc<RwLock<VecDeque<IntentRecord>>>,
    /// Broadcast channel for real-time WebSocket events.
    pub event_tx: broadcast::Sender<WsEvent>,
    /// Where validated intents are forwarded (None records only).
    pub backend: Option<Arc<dyn IntentBackend>>,
}

/// A submission and what the backend made of it.
#[derive(Debug, Clone, Serialize)]
pub struct IntentRecord {
    pub submission: IntentSubmission,
    pub status: SubmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<BackendReceipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AppState {
    /// Create state that records intents without forwarding them.
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Self {
            intents: Arc::new(RwLock::new(VecDeque::new())),
            event_tx,
            backend: None,
        }
    }

    /// Create state that forwards intents to `backend`.
    pub fn with_backend(backend: Arc<dyn IntentBackend>) -> Self {
        Self {
            backend: Some(backend),
            ..Self::new()
        }
    }

    /// Append a record, evicting the oldest past `MAX_RECORDS`.
    pub async fn record(&self, record: IntentRecord) {
        let mut intents = self.intents.write().await;
        intents.push_back(record);
        while intents.len() > MAX_RECORDS {
            intents.pop_front();
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
