use serde::{Deserialize, Serialize};

use crate::intent::ParsedIntent;

/// Outcome of parsing one line of intent text.
///
/// On the wire this is `{"ok":true,"intent":{...}}` or
/// `{"ok":false,"error":"..."}` so clients can branch on `ok` alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireResult", try_from = "WireResult")]
pub enum ParsedIntentResult {
    Parsed(ParsedIntent),
    Rejected(String),
}

impl ParsedIntentResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, ParsedIntentResult::Parsed(_))
    }

    pub fn intent(&self) -> Option<&ParsedIntent> {
        match self {
            ParsedIntentResult::Parsed(intent) => Some(intent),
            ParsedIntentResult::Rejected(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ParsedIntentResult::Parsed(_) => None,
            ParsedIntentResult::Rejected(error) => Some(error),
        }
    }
}

impl<E: std::fmt::Display> From<Result<ParsedIntent, E>> for ParsedIntentResult {
    fn from(result: Result<ParsedIntent, E>) -> Self {
        match result {
            Ok(intent) => ParsedIntentResult::Parsed(intent),
            Err(e) => ParsedIntentResult::Rejected(e.to_string()),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct WireResult {
    ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    intent: Option<ParsedIntent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<ParsedIntentResult> for WireResult {
    fn from(result: ParsedIntentResult) -> Self {
        match result {
            ParsedIntentResult::Parsed(intent) => WireResult {
                ok: true,
                intent: Some(intent),
                error: None,
            },
            ParsedIntentResult::Rejected(error) => WireResult {
                ok: false,
                intent: None,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<WireResult> for ParsedIntentResult {
    type Error = String;

    fn try_from(wire: WireResult) -> Result<Self, Self::Error> {
        match (wire.ok, wire.intent, wire.error) {
            (true, Some(intent), _) => Ok(ParsedIntentResult::Parsed(intent)),
            (false, _, Some(error)) => Ok(ParsedIntentResult::Rejected(error)),
            (true, None, _) => Err("ok result is missing `intent`".into()),
            (false, _, None) => Err("failed result is missing `error`".into()),
        }
    }
}
