use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::dto::scheduler_dto::{
    BulkInvitationPayload, CreateInvitationPayload, CreateInvitationResponse, HistoryQuery,
    InvitationView,
};
use crate::error::Result;
use crate::services::scheduling_service::BatchSummary;
use crate::utils::validation::validate;
use crate::AppState;

const DEFAULT_HISTORY_LIMIT: usize = 50;

pub async fn create_invitation(
    State(state): State<AppState>,
    Json(payload): Json<CreateInvitationPayload>,
) -> Result<(StatusCode, Json<CreateInvitationResponse>)> {
    validate(&payload)?;
    let candidate_id = state
        .scheduling_service
        .schedule_single(&payload.role, &payload.email, &payload.date_time)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateInvitationResponse {
            candidate_id,
            reference: format!("CANDIDATE #{:04}", candidate_id),
        }),
    ))
}

pub async fn create_bulk(
    State(state): State<AppState>,
    Json(payload): Json<BulkInvitationPayload>,
) -> Result<(StatusCode, Json<BatchSummary>)> {
    validate(&payload)?;
    let summary = state.scheduling_service.schedule_bulk(&payload.text).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

pub async fn invitation_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<InvitationView>> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let history = state.scheduling_service.invitation_history(limit).await;
    Json(history.into_iter().map(InvitationView::from).collect())
}

pub async fn get_batch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<crate::models::batch::Batch>> {
    let batch = state.scheduling_service.batch(id).await?;
    Ok(Json(batch))
}
