//! Intent parsing and submission endpoints.

use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use td_intent_parser::{parse_intent, try_parse_intent};
use td_protocol::{IntentKind, IntentSubmission, ParsedIntentResult, SubmissionStatus};

use crate::error::{ApiError, ApiResult};
use crate::events::WsEvent;
use crate::state::{AppState, IntentRecord};

/// Request body for previewing a parse.
#[derive(Debug, Deserialize)]
pub struct ParseIntentRequest {
    /// Free-form intent text.
    pub text: String,
}

/// Request body for submitting an intent.
#[derive(Debug, Deserialize)]
pub struct SubmitIntentRequest {
    /// Free-form intent text.
    pub text: String,
    /// Who is submitting this intent.
    pub submitted_by: String,
}

/// Row in the intent list.
#[derive(Debug, Serialize)]
pub struct IntentListItem {
    pub id: Uuid,
    pub kind: IntentKind,
    pub summary: String,
    pub status: SubmissionStatus,
    pub submitted_by: String,
    pub created_at: DateTime<Utc>,
}

/// POST /api/v1/intents/parse: parse text without submitting it.
///
/// Always answers 200; rejection is reported in the body as `{ok: false}`.
pub async fn parse(
    State(state): State<AppState>,
    Json(req): Json<ParseIntentRequest>,
) -> Json<ParsedIntentResult> {
    let result = parse_intent(&req.text);

    let event = match &result {
        ParsedIntentResult::Parsed(intent) => WsEvent::IntentParsed {
            kind: intent.kind(),
            summary: intent.summary().to_string(),
            timestamp: Utc::now(),
        },
        ParsedIntentResult::Rejected(error) => WsEvent::IntentRejected {
            error: error.clone(),
            timestamp: Utc::now(),
        },
    };
    let _ = state.event_tx.send(event);

    Json(result)
}

/// POST /api/v1/intents: parse, forward to the backend, and record.
pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitIntentRequest>,
) -> ApiResult<Json<IntentRecord>> {
    let submitted_by = req.submitted_by.trim();
    if submitted_by.is_empty() {
        return Err(ApiError::BadRequest("submitted_by is required".into()));
    }

    let intent = try_parse_intent(&req.text).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let submission = IntentSubmission::new(req.text.trim(), intent, submitted_by);

    let record = match &state.backend {
        Some(backend) => {
            let outcome = backend.submit(&submission).await;
            match outcome {
                Ok(receipt) => IntentRecord {
                    submission,
                    status: SubmissionStatus::Forwarded,
                    receipt: Some(receipt),
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(
                        submission_id = %submission.id,
                        backend = backend.name(),
                        error = %e,
                        "intent forwarding failed"
                    );
                    IntentRecord {
                        submission,
                        status: SubmissionStatus::Failed,
                        receipt: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        }
        None => {
            tracing::info!(
                submission_id = %submission.id,
                "intent recorded (no backend configured)"
            );
            IntentRecord {
                submission,
                status: SubmissionStatus::Pending,
                receipt: None,
                error: None,
            }
        }
    };

    state.record(record.clone()).await;

    let _ = state.event_tx.send(WsEvent::IntentSubmitted {
        id: record.submission.id,
        kind: record.submission.intent.kind(),
        summary: record.submission.intent.summary().to_string(),
        status: record.status,
        submitted_by: record.submission.submitted_by.clone(),
        created_at: record.submission.created_at,
    });

    if let Some(error) = &record.error {
        return Err(ApiError::BadGateway(error.clone()));
    }
    Ok(Json(record))
}

/// GET /api/v1/intents/{id}: one recorded submission.
pub async fn get_intent(
    State(state): State<AppState>,
    Path(intent_id): Path<Uuid>,
) -> ApiResult<Json<IntentRecord>> {
    let intents = state.intents.read().await;
    intents
        .iter()
        .find(|r| r.submission.id == intent_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("intent '{intent_id}' not found")))
}

/// GET /api/v1/intents: the 50 most recent submissions, newest first.
pub async fn list_intents(State(state): State<AppState>) -> Json<Vec<IntentListItem>> {
    let intents = state.intents.read().await;
    let recent = intents
        .iter()
        .rev()
        .take(50)
        .map(|r| IntentListItem {
            id: r.submission.id,
            kind: r.submission.intent.kind(),
            summary: r.submission.intent.summary().to_string(),
            status: r.status,
            submitted_by: r.submission.submitted_by.clone(),
            created_at: r.submission.created_at,
        })
        .collect();
    Json(recent)
}
