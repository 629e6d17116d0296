pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use crate::services::{
    candidate_service::CandidateService,
    delivery_service::{DeliveryDispatcher, DeliveryService},
    invitation_service::InvitationService,
    scheduling_service::SchedulingService,
};
use crate::store::Store;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub candidate_service: CandidateService,
    pub invitation_service: InvitationService,
    pub scheduling_service: SchedulingService,
    pub delivery_service: DeliveryService,
}

impl AppState {
    /// Wires the engine onto the given store and returns the outbound
    /// delivery dispatcher for the caller to spawn.
    pub fn new(store: Arc<dyn Store>) -> (Self, DeliveryDispatcher) {
        let config = crate::config::get_config();

        let (delivery_service, rx) = DeliveryService::new();
        let dispatcher = DeliveryDispatcher::new(
            rx,
            config.delivery_webhook_url.clone(),
            config.webhook_secret.clone(),
        );

        let candidate_service = CandidateService::new(store.clone());
        let invitation_service = InvitationService::new(store.clone());
        let scheduling_service = SchedulingService::new(
            store.clone(),
            candidate_service.clone(),
            invitation_service.clone(),
            delivery_service.clone(),
        );

        (
            Self {
                store,
                candidate_service,
                invitation_service,
                scheduling_service,
                delivery_service,
            },
            dispatcher,
        )
    }
}

/// Full route surface. Recruiter routes sit behind the bearer middleware
/// and a fixed-window request limit; webhook routes carry their own
/// shared-secret check.
pub fn app(state: AppState) -> Router {
    let config = crate::config::get_config();

    let recruiter_api = Router::new()
        .route(
            "/api/scheduler/invitations",
            post(routes::scheduler::create_invitation),
        )
        .route(
            "/api/scheduler/invitations/bulk",
            post(routes::scheduler::create_bulk),
        )
        .route(
            "/api/scheduler/history",
            get(routes::scheduler::invitation_history),
        )
        .route(
            "/api/scheduler/batches/:id",
            get(routes::scheduler::get_batch),
        )
        .route("/api/candidates", get(routes::candidates::list_candidates))
        .route(
            "/api/candidates/:id",
            get(routes::candidates::get_candidate),
        )
        .route(
            "/api/candidates/:id/decision",
            post(routes::candidates::decide_candidate),
        )
        .layer(axum::middleware::from_fn(
            middleware::auth::require_recruiter,
        ))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::RateLimiter::new(config.recruiter_rps),
            middleware::rate_limit::enforce_rps,
        ));

    let webhook_api = Router::new()
        .route(
            "/api/webhook/session-completed",
            post(routes::webhook::handle_session_completed),
        )
        .route(
            "/api/webhook/delivery",
            post(routes::webhook::handle_delivery_event),
        );

    Router::new()
        .route("/health", get(routes::health::health))
        .merge(recruiter_api)
        .merge(webhook_api)
        .with_state(state)
}
