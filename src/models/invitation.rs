use crate::models::candidate::CandidateId;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryState {
    Queued,
    Sent,
    Delivered,
    Opened,
    Failed,
}

impl DeliveryState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryState::Queued => "queued",
            DeliveryState::Sent => "sent",
            DeliveryState::Delivered => "delivered",
            DeliveryState::Opened => "opened",
            DeliveryState::Failed => "failed",
        }
    }

    fn rank(&self) -> Option<u8> {
        match self {
            DeliveryState::Queued => Some(0),
            DeliveryState::Sent => Some(1),
            DeliveryState::Delivered => Some(2),
            DeliveryState::Opened => Some(3),
            DeliveryState::Failed => None,
        }
    }

    /// Only `queued -> sent -> delivered -> opened` single steps, plus
    /// `* -> failed` from anywhere.
    pub fn can_advance_to(&self, next: DeliveryState) -> bool {
        if next == DeliveryState::Failed {
            return true;
        }
        match (self.rank(), next.rank()) {
            (Some(current), Some(target)) => target == current + 1,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    pub id: Uuid,
    pub candidate_id: CandidateId,
    pub email: String,
    pub role: String,
    pub scheduled_at: NaiveDateTime,
    pub delivery_state: DeliveryState,
    pub batch_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
