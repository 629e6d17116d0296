use crate::models::candidate::CandidateId;
use crate::models::invitation::DeliveryState;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct WebhookEnvelope<T> {
    pub event: String,
    #[serde(flatten)]
    pub payload: T,
}

/// Inbound event from the live-session collaborator.
#[derive(Debug, Deserialize)]
pub struct SessionCompletedPayload {
    pub candidate_id: CandidateId,
    pub score: i32,
}

/// Inbound delivery-state report from the email transport.
#[derive(Debug, Deserialize)]
pub struct DeliveryEventPayload {
    pub invitation_id: Uuid,
    pub state: DeliveryState,
}
