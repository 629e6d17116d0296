use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};

use crate::dto::candidate_dto::{DecisionPayload, ListCandidatesQuery};
use crate::middleware::auth::Claims;
use crate::error::Result;
use crate::models::candidate::{CandidateId, CandidateView};
use crate::services::pipeline;
use crate::services::scheduling_service::CandidateListing;
use crate::AppState;

pub async fn list_candidates(
    State(state): State<AppState>,
    Query(query): Query<ListCandidatesQuery>,
) -> Json<CandidateListing> {
    let listing = state.scheduling_service.list_candidates(&query.into()).await;
    Json(listing)
}

/// Detail view; opening it is the explicit "viewed" action that flips the
/// seen flag.
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<CandidateId>,
) -> Result<Json<CandidateView>> {
    let view = state.scheduling_service.view_candidate(id).await?;
    Ok(Json(view))
}

pub async fn decide_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<CandidateId>,
    Json(payload): Json<DecisionPayload>,
) -> Result<Json<CandidateView>> {
    let decision = payload.into_decision()?;
    let candidate = state.candidate_service.decide(id, decision).await?;
    tracing::info!(candidate_id = id, recruiter = %claims.sub, "decision submitted");
    Ok(Json(pipeline::project(&candidate)))
}
