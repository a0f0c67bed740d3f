//! Shared test harness for E2E integration tests.
//!
//! Wires the API router to a backend (mock, HTTP, or none) and exposes
//! request helpers that return `(StatusCode, JSON body)`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tokio::sync::broadcast;
use tower::ServiceExt;

use td_api::backend::IntentBackend;
use td_api::events::WsEvent;
use td_api::mock::MockBackend;
use td_api::routes::build_router;
use td_api::state::{AppState, IntentRecord};

/// End-to-end test harness around the TradeDesk API router.
pub struct TestHarness {
    /// Application state shared with the router.
    pub state: AppState,
    /// Axum router for HTTP requests via `tower::oneshot`.
    pub router: Router,
    /// Recording backend, when the harness was built with one.
    pub mock: Option<Arc<MockBackend>>,
    /// WebSocket event receiver for asserting broadcast events.
    pub event_rx: broadcast::Receiver<WsEvent>,
}

impl TestHarness {
    /// Harness with no backend: submissions are recorded as pending.
    pub fn without_backend() -> Self {
        Self::from_state(AppState::new(), None)
    }

    /// Harness forwarding to an accepting `MockBackend`.
    pub fn with_mock() -> Self {
        let mock = Arc::new(MockBackend::new());
        Self::from_state(AppState::with_backend(mock.clone()), Some(mock))
    }

    /// Harness forwarding to a `MockBackend` that always fails.
    pub fn with_failing_mock(status: u16, body: &str) -> Self {
        let mock = Arc::new(MockBackend::rejecting(status, body));
        Self::from_state(AppState::with_backend(mock.clone()), Some(mock))
    }

    /// Harness forwarding to an arbitrary backend.
    pub fn with_backend(backend: Arc<dyn IntentBackend>) -> Self {
        Self::from_state(AppState::with_backend(backend), None)
    }

    fn from_state(state: AppState, mock: Option<Arc<MockBackend>>) -> Self {
        let event_rx = state.event_tx.subscribe();
        let router = build_router(state.clone());
        Self {
            state,
            router,
            mock,
            event_rx,
        }
    }

    /// POST /api/v1/intents/parse
    pub async fn parse(&self, text: &str) -> (StatusCode, serde_json::Value) {
        self.post("/api/v1/intents/parse", serde_json::json!({ "text": text }))
            .await
    }

    /// POST /api/v1/intents
    pub async fn submit(&self, text: &str, submitted_by: &str) -> (StatusCode, serde_json::Value) {
        self.post(
            "/api/v1/intents",
            serde_json::json!({ "text": text, "submitted_by": submitted_by }),
        )
        .await
    }

    /// GET /api/v1/intents
    pub async fn list(&self) -> (StatusCode, serde_json::Value) {
        self.get("/api/v1/intents").await
    }

    /// GET /api/v1/intents/{id}
    pub async fn get_intent(&self, id: &str) -> (StatusCode, serde_json::Value) {
        self.get(&format!("/api/v1/intents/{id}")).await
    }

    /// Get a record straight from in-memory state.
    pub async fn record(&self, id: uuid::Uuid) -> Option<IntentRecord> {
        let intents = self.state.intents.read().await;
        intents.iter().find(|r| r.submission.id == id).cloned()
    }

    /// Drain every event broadcast so far.
    pub fn drain_events(&mut self) -> Vec<WsEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }
        events
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post(&self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        self.send(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        // Extractor rejections answer in plain text.
        let json = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        });
        (status, json)
    }
}
