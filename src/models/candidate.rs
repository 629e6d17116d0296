use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type CandidateId = u64;

/// Pipeline stage. `scheduled` is initial, `accepted` and `rejected` are
/// terminal; see `services::pipeline` for the transition rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    Scheduled,
    InterviewCompleted,
    Accepted,
    Rejected,
}

impl CandidateStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CandidateStatus::Accepted | CandidateStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::Scheduled => "scheduled",
            CandidateStatus::InterviewCompleted => "interview_completed",
            CandidateStatus::Accepted => "accepted",
            CandidateStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub role: String,
    pub score: Option<i32>,
    pub status: CandidateStatus,
    pub name: Option<String>,
    pub seen: bool,
    pub created_at: DateTime<Utc>,
}

impl Candidate {
    /// Padded blind reference used everywhere the identity is withheld.
    pub fn reference(&self) -> String {
        format!("CANDIDATE #{:04}", self.id)
    }
}

/// Recruiter decision on a graded candidate. The disclosed name travels
/// inside `Accepted`, so a name can never be attached to any other state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accepted { name: String },
    Rejected,
}

/// Disclosure-filtered projection returned by every read path.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateView {
    pub id: CandidateId,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: String,
    pub score: Option<i32>,
    pub status: CandidateStatus,
    pub seen: bool,
    pub created_at: DateTime<Utc>,
}
