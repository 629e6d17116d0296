use crate::error::{Error, Result};
use crate::models::batch::Batch;
use crate::models::candidate::{Candidate, CandidateId, CandidateStatus};
use crate::models::invitation::Invitation;
use crate::store::{CandidateUpdate, InvitationUpdate, Store};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

struct Inner {
    next_candidate_id: CandidateId,
    candidates: HashMap<CandidateId, Candidate>,
    invitations: Vec<Invitation>,
    batches: HashMap<Uuid, Batch>,
    last_modified: DateTime<Utc>,
}

impl Inner {
    fn touch(&mut self) {
        self.last_modified = Utc::now();
    }
}

/// In-memory store. Mutations funnel through the single write lock, which
/// is strictly stronger than the required per-id serialization.
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_candidate_id: 1,
                candidates: HashMap::new(),
                invitations: Vec::new(),
                batches: HashMap::new(),
                last_modified: Utc::now(),
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_candidate(&self, role: String) -> Candidate {
        let mut inner = self.inner.write().await;
        let id = inner.next_candidate_id;
        inner.next_candidate_id += 1;
        let candidate = Candidate {
            id,
            role,
            score: None,
            status: CandidateStatus::Scheduled,
            name: None,
            seen: false,
            created_at: Utc::now(),
        };
        inner.candidates.insert(id, candidate.clone());
        inner.touch();
        candidate
    }

    async fn get_candidate(&self, id: CandidateId) -> Option<Candidate> {
        self.inner.read().await.candidates.get(&id).cloned()
    }

    async fn update_candidate(&self, id: CandidateId, apply: CandidateUpdate) -> Result<Candidate> {
        let mut inner = self.inner.write().await;
        let current = inner
            .candidates
            .get(&id)
            .ok_or_else(|| Error::NotFound(format!("Candidate {} not found", id)))?;

        // Apply against a copy so a rejected transition has no effect.
        let mut updated = current.clone();
        apply(&mut updated)?;
        inner.candidates.insert(id, updated.clone());
        inner.touch();
        Ok(updated)
    }

    async fn list_candidates(&self) -> Vec<Candidate> {
        self.inner.read().await.candidates.values().cloned().collect()
    }

    async fn insert_invitation(&self, invitation: Invitation) {
        let mut inner = self.inner.write().await;
        inner.invitations.push(invitation);
        inner.touch();
    }

    async fn get_invitation(&self, id: Uuid) -> Option<Invitation> {
        self.inner
            .read()
            .await
            .invitations
            .iter()
            .find(|inv| inv.id == id)
            .cloned()
    }

    async fn update_invitation(&self, id: Uuid, apply: InvitationUpdate) -> Result<Invitation> {
        let mut inner = self.inner.write().await;
        let position = inner
            .invitations
            .iter()
            .position(|inv| inv.id == id)
            .ok_or_else(|| Error::NotFound(format!("Invitation {} not found", id)))?;

        let mut updated = inner.invitations[position].clone();
        apply(&mut updated)?;
        inner.invitations[position] = updated.clone();
        inner.touch();
        Ok(updated)
    }

    async fn list_invitations(&self) -> Vec<Invitation> {
        self.inner.read().await.invitations.clone()
    }

    async fn insert_batch(&self, batch: Batch) {
        let mut inner = self.inner.write().await;
        inner.batches.insert(batch.id, batch);
        inner.touch();
    }

    async fn get_batch(&self, id: Uuid) -> Option<Batch> {
        self.inner.read().await.batches.get(&id).cloned()
    }

    async fn last_modified(&self) -> DateTime<Utc> {
        self.inner.read().await.last_modified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_sequential_and_records_start_blind() {
        let store = MemoryStore::new();
        let first = store.create_candidate("Backend".into()).await;
        let second = store.create_candidate("Frontend".into()).await;
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.status, CandidateStatus::Scheduled);
        assert!(first.name.is_none());
        assert!(!first.seen);
    }

    #[tokio::test]
    async fn failed_update_leaves_record_unchanged() {
        let store = MemoryStore::new();
        let candidate = store.create_candidate("Backend".into()).await;

        let result = store
            .update_candidate(
                candidate.id,
                Box::new(|c| {
                    c.seen = true;
                    Err(Error::Internal("boom".into()))
                }),
            )
            .await;
        assert!(result.is_err());

        let reloaded = store.get_candidate(candidate.id).await.unwrap();
        assert!(!reloaded.seen);
    }

    #[tokio::test]
    async fn mutations_bump_the_marker() {
        let store = MemoryStore::new();
        let before = store.last_modified().await;
        store.create_candidate("Backend".into()).await;
        assert!(store.last_modified().await >= before);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_candidate(42, Box::new(|_| Ok(())))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
