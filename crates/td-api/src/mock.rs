//! Mock intent backend for testing without a real trading API.
//!
//! Records every submission and answers with a canned receipt or a
//! canned failure.

use async_trait::async_trait;
use std::sync::Mutex;

use td_protocol::{BackendReceipt, IntentSubmission};

use crate::backend::{BackendError, IntentBackend};

/// Mock implementation of the `IntentBackend` trait.
pub struct MockBackend {
    submitted: Mutex<Vec<IntentSubmission>>,
    reject_with: Option<(u16, String)>,
}

impl MockBackend {
    /// Backend that accepts every intent.
    pub fn new() -> Self {
        Self {
            submitted: Mutex::new(Vec::new()),
            reject_with: None,
        }
    }

    /// Backend that answers every intent with the given HTTP status and body.
    pub fn rejecting(status: u16, body: impl Into<String>) -> Self {
        Self {
            submitted: Mutex::new(Vec::new()),
            reject_with: Some((status, body.into())),
        }
    }

    /// All submissions received so far.
    pub fn submitted(&self) -> Vec<IntentSubmission> {
        self.submitted.lock().unwrap().clone()
    }

    /// The most recent submission.
    pub fn last_submitted(&self) -> Option<IntentSubmission> {
        self.submitted.lock().unwrap().last().cloned()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IntentBackend for MockBackend {
    async fn submit(&self, submission: &IntentSubmission) -> Result<BackendReceipt, BackendError> {
        self.submitted.lock().unwrap().push(submission.clone());
        match &self.reject_with {
            Some((status, body)) => Err(BackendError::Status {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(BackendReceipt {
                id: format!("mock-{}", submission.id),
                status: "queued".into(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
