use crate::error::{Error, Result};
use crate::models::candidate::{CandidateStatus, Decision};
use crate::services::candidate_service::{ActivityFilter, CandidateFilter};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListCandidatesQuery {
    pub status: Option<CandidateStatus>,
    pub activity: Option<ActivityFilter>,
}

impl From<ListCandidatesQuery> for CandidateFilter {
    fn from(query: ListCandidatesQuery) -> Self {
        CandidateFilter {
            status: query.status,
            activity: query.activity.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    Accepted,
    Rejected,
}

#[derive(Debug, Deserialize)]
pub struct DecisionPayload {
    pub outcome: DecisionOutcome,
    /// Disclosed identity; required for `accepted`, ignored otherwise.
    pub name: Option<String>,
}

impl DecisionPayload {
    pub fn into_decision(self) -> Result<Decision> {
        match self.outcome {
            DecisionOutcome::Accepted => {
                let name = self.name.ok_or(Error::MissingField("name"))?;
                Ok(Decision::Accepted { name })
            }
            DecisionOutcome::Rejected => Ok(Decision::Rejected),
        }
    }
}
