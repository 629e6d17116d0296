use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One validated line of a bulk payload, ready to be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationRequest {
    pub email: String,
    pub role: String,
    pub scheduled_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLine {
    pub line: usize,
    pub request: InvitationRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineError {
    pub line: usize,
    pub reason: String,
}

/// Per-line outcome as persisted in the batch audit record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LineOutcome {
    Parsed { line: usize, request: InvitationRequest },
    Invalid { line: usize, reason: String },
}

impl From<Result<ParsedLine, LineError>> for LineOutcome {
    fn from(result: Result<ParsedLine, LineError>) -> Self {
        match result {
            Ok(parsed) => LineOutcome::Parsed {
                line: parsed.line,
                request: parsed.request,
            },
            Err(err) => LineOutcome::Invalid {
                line: err.line,
                reason: err.reason,
            },
        }
    }
}

/// Write-once audit record of one bulk submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub id: Uuid,
    pub raw_text: String,
    pub submitted_at: DateTime<Utc>,
    pub outcomes: Vec<LineOutcome>,
}
