use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvitationPayload {
    #[validate(length(max = 200, message = "Role label is too long"))]
    pub role: String,
    #[validate(length(max = 254, message = "Email is too long"))]
    pub email: String,
    pub date_time: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BulkInvitationPayload {
    // One record per line; a pasted list beyond this is almost certainly a
    // wrong file.
    #[validate(length(max = 1000000, message = "Bulk payload is too large"))]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CreateInvitationResponse {
    pub candidate_id: u64,
    pub reference: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct InvitationView {
    pub id: Uuid,
    pub candidate_id: u64,
    pub email: String,
    pub role: String,
    pub scheduled_at: String,
    pub delivery_state: crate::models::invitation::DeliveryState,
    pub batch_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<crate::models::invitation::Invitation> for InvitationView {
    fn from(inv: crate::models::invitation::Invitation) -> Self {
        Self {
            id: inv.id,
            candidate_id: inv.candidate_id,
            email: inv.email,
            role: inv.role,
            scheduled_at: inv
                .scheduled_at
                .format(crate::utils::time::SCHEDULE_FORMAT)
                .to_string(),
            delivery_state: inv.delivery_state,
            batch_id: inv.batch_id,
            created_at: inv.created_at,
        }
    }
}
