use axum::{extract::State, http::StatusCode, Json};
use subtle::ConstantTimeEq;

use crate::dto::webhook_dto::{DeliveryEventPayload, SessionCompletedPayload, WebhookEnvelope};
use crate::services::pipeline;
use crate::{
    config::get_config,
    error::{Error, Result},
    AppState,
};

/// `session_completed(candidate_id, score)` from the live-session
/// collaborator: grades the candidate and moves it to
/// `interview_completed`.
pub async fn handle_session_completed(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    Json(envelope): Json<WebhookEnvelope<SessionCompletedPayload>>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    verify_secret(&headers)?;
    if envelope.event != "session_completed" {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "unexpected_event" })),
        ));
    }

    let candidate = state
        .candidate_service
        .record_score(envelope.payload.candidate_id, envelope.payload.score)
        .await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::to_value(pipeline::project(&candidate))?),
    ))
}

/// Delivery-state report from the email transport.
pub async fn handle_delivery_event(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    Json(envelope): Json<WebhookEnvelope<DeliveryEventPayload>>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    verify_secret(&headers)?;
    if envelope.event != "delivery_state" {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "unexpected_event" })),
        ));
    }

    let invitation = state
        .invitation_service
        .update_delivery_state(envelope.payload.invitation_id, envelope.payload.state)
        .await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "invitation_id": invitation.id,
            "delivery_state": invitation.delivery_state,
        })),
    ))
}

fn verify_secret(headers: &axum::http::HeaderMap) -> Result<()> {
    let Some(secret_hdr) = headers.get("x-webhook-secret") else {
        return Err(Error::Unauthorized("missing_webhook_secret".into()));
    };
    let provided = secret_hdr
        .to_str()
        .map_err(|_| Error::Unauthorized("invalid_secret_header".into()))?;
    let expected = &get_config().webhook_secret;
    if ConstantTimeEq::ct_eq(provided.as_bytes(), expected.as_bytes()).into() {
        Ok(())
    } else {
        Err(Error::Unauthorized("invalid_webhook_secret".into()))
    }
}
