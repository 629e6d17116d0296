use crate::error::{Error, Result};
use crate::models::batch::{Batch, InvitationRequest};
use crate::models::candidate::CandidateId;
use crate::models::invitation::{DeliveryState, Invitation};
use crate::store::Store;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Ledger of every invitation and its delivery-state history.
#[derive(Clone)]
pub struct InvitationService {
    store: Arc<dyn Store>,
}

impl InvitationService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn record(
        &self,
        candidate_id: CandidateId,
        request: &InvitationRequest,
        batch_id: Option<Uuid>,
    ) -> Invitation {
        let invitation = Invitation {
            id: Uuid::new_v4(),
            candidate_id,
            email: request.email.clone(),
            role: request.role.clone(),
            scheduled_at: request.scheduled_at,
            delivery_state: DeliveryState::Queued,
            batch_id,
            created_at: Utc::now(),
        };
        self.store.insert_invitation(invitation.clone()).await;
        invitation
    }

    /// Applies a delivery-state event reported by the transport. Rejected
    /// progressions leave the ledger entry unchanged.
    pub async fn update_delivery_state(
        &self,
        id: Uuid,
        next: DeliveryState,
    ) -> Result<Invitation> {
        let invitation = self
            .store
            .update_invitation(
                id,
                Box::new(move |inv| {
                    if !inv.delivery_state.can_advance_to(next) {
                        return Err(Error::InvalidDeliveryTransition(
                            inv.delivery_state.as_str().to_string(),
                            next.as_str().to_string(),
                        ));
                    }
                    inv.delivery_state = next;
                    Ok(())
                }),
            )
            .await?;
        tracing::info!(invitation_id = %id, state = next.as_str(), "delivery state advanced");
        Ok(invitation)
    }

    pub async fn history(&self, limit: usize) -> Vec<Invitation> {
        let mut invitations = self.store.list_invitations().await;
        // Reverse before the stable sort so same-instant entries still come
        // back newest-insertion-first.
        invitations.reverse();
        invitations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        invitations.truncate(limit);
        invitations
    }

    pub async fn record_batch(&self, batch: Batch) {
        self.store.insert_batch(batch).await;
    }

    pub async fn batch(&self, id: Uuid) -> Result<Batch> {
        self.store
            .get_batch(id)
            .await
            .ok_or_else(|| Error::NotFound(format!("Batch {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn request() -> InvitationRequest {
        InvitationRequest {
            email: "a@b.com".into(),
            role: "Backend".into(),
            scheduled_at: crate::utils::time::parse_schedule("2024-02-10 14:00").unwrap(),
        }
    }

    #[tokio::test]
    async fn delivery_states_progress_forward_only() {
        let svc = InvitationService::new(Arc::new(MemoryStore::new()));
        let invitation = svc.record(1, &request(), None).await;

        svc.update_delivery_state(invitation.id, DeliveryState::Sent)
            .await
            .unwrap();
        svc.update_delivery_state(invitation.id, DeliveryState::Delivered)
            .await
            .unwrap();
        let opened = svc
            .update_delivery_state(invitation.id, DeliveryState::Opened)
            .await
            .unwrap();
        assert_eq!(opened.delivery_state, DeliveryState::Opened);

        let err = svc
            .update_delivery_state(invitation.id, DeliveryState::Sent)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDeliveryTransition(_, _)));

        // The rejected event left the ledger untouched.
        let current = svc.store.get_invitation(invitation.id).await.unwrap();
        assert_eq!(current.delivery_state, DeliveryState::Opened);
    }

    #[tokio::test]
    async fn any_state_may_fail() {
        let svc = InvitationService::new(Arc::new(MemoryStore::new()));
        let invitation = svc.record(1, &request(), None).await;
        svc.update_delivery_state(invitation.id, DeliveryState::Sent)
            .await
            .unwrap();
        let failed = svc
            .update_delivery_state(invitation.id, DeliveryState::Failed)
            .await
            .unwrap();
        assert_eq!(failed.delivery_state, DeliveryState::Failed);
    }

    #[tokio::test]
    async fn history_is_newest_first_and_limited() {
        let svc = InvitationService::new(Arc::new(MemoryStore::new()));
        for candidate_id in 1..=3 {
            svc.record(candidate_id, &request(), None).await;
        }
        let history = svc.history(2).await;
        assert_eq!(history.len(), 2);
        assert!(history[0].created_at >= history[1].created_at);
    }
}
