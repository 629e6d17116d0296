use crate::error::Result;
use crate::models::candidate::{Candidate, CandidateId, CandidateStatus, Decision};
use crate::services::pipeline;
use crate::store::Store;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityFilter {
    #[default]
    Any,
    Seen,
    Unseen,
}

impl ActivityFilter {
    fn matches(&self, seen: bool) -> bool {
        match self {
            ActivityFilter::Any => true,
            ActivityFilter::Seen => seen,
            ActivityFilter::Unseen => !seen,
        }
    }
}

/// Conjunction of status and seen-state constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateFilter {
    pub status: Option<CandidateStatus>,
    pub activity: ActivityFilter,
}

#[derive(Clone)]
pub struct CandidateService {
    store: Arc<dyn Store>,
}

impl CandidateService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, role: &str) -> Candidate {
        let candidate = self.store.create_candidate(role.to_string()).await;
        tracing::info!(candidate_id = candidate.id, role = %candidate.role, "candidate created");
        candidate
    }

    /// Applies the `session_completed(candidate_id, score)` event.
    pub async fn record_score(&self, id: CandidateId, score: i32) -> Result<Candidate> {
        let candidate = self
            .store
            .update_candidate(id, Box::new(move |c| pipeline::record_score(c, score)))
            .await?;
        tracing::info!(candidate_id = id, score, "interview graded");
        Ok(candidate)
    }

    pub async fn decide(&self, id: CandidateId, decision: Decision) -> Result<Candidate> {
        let candidate = self
            .store
            .update_candidate(id, Box::new(move |c| pipeline::decide(c, decision)))
            .await?;
        tracing::info!(candidate_id = id, status = candidate.status.as_str(), "decision recorded");
        Ok(candidate)
    }

    /// Idempotent; the only path that flips the seen flag.
    pub async fn mark_seen(&self, id: CandidateId) -> Result<Candidate> {
        self.store
            .update_candidate(
                id,
                Box::new(|c| {
                    c.seen = true;
                    Ok(())
                }),
            )
            .await
    }

    pub async fn get(&self, id: CandidateId) -> Result<Candidate> {
        self.store
            .get_candidate(id)
            .await
            .ok_or_else(|| crate::error::Error::NotFound(format!("Candidate {} not found", id)))
    }

    /// Newest first by creation time, id as the tie-break.
    pub async fn list(&self, filter: &CandidateFilter) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = self
            .store
            .list_candidates()
            .await
            .into_iter()
            .filter(|c| filter.status.map_or(true, |s| c.status == s))
            .filter(|c| filter.activity.matches(c.seen))
            .collect();
        candidates.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        candidates
    }
}
