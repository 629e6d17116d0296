pub mod memory;

use crate::error::Result;
use crate::models::batch::Batch;
use crate::models::candidate::{Candidate, CandidateId};
use crate::models::invitation::Invitation;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub type CandidateUpdate = Box<dyn FnOnce(&mut Candidate) -> Result<()> + Send>;
pub type InvitationUpdate = Box<dyn FnOnce(&mut Invitation) -> Result<()> + Send>;

/// Backing store for candidates, invitations and batch audit records.
///
/// Updates go through a closure applied under the store's write lock, so a
/// rejected transition leaves the record untouched and concurrent mutations
/// on the same id are serialized. Every successful mutation bumps the
/// `last_modified` marker consumed by the query surface.
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_candidate(&self, role: String) -> Candidate;
    async fn get_candidate(&self, id: CandidateId) -> Option<Candidate>;
    async fn update_candidate(&self, id: CandidateId, apply: CandidateUpdate) -> Result<Candidate>;
    async fn list_candidates(&self) -> Vec<Candidate>;

    async fn insert_invitation(&self, invitation: Invitation);
    async fn get_invitation(&self, id: Uuid) -> Option<Invitation>;
    async fn update_invitation(&self, id: Uuid, apply: InvitationUpdate) -> Result<Invitation>;
    async fn list_invitations(&self) -> Vec<Invitation>;

    async fn insert_batch(&self, batch: Batch);
    async fn get_batch(&self, id: Uuid) -> Option<Batch>;

    async fn last_modified(&self) -> DateTime<Utc>;
}
