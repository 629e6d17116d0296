use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid transition from status '{0}'")]
    InvalidTransition(String),

    #[error("Candidate is in terminal state '{0}'")]
    TerminalState(String),

    #[error("A score has already been recorded for this candidate")]
    DuplicateGrade,

    #[error("No score has been recorded for this candidate")]
    MissingScore,

    #[error("Invalid delivery transition from '{0}' to '{1}'")]
    InvalidDeliveryTransition(String, String),

    #[error("Bulk payload is empty")]
    EmptyBatch,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Stable machine-readable code surfaced alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Config(_) => "config_error",
            Error::MissingField(_) => "missing_field",
            Error::Validation(_) => "validation_error",
            Error::Unauthorized(_) => "unauthorized",
            Error::NotFound(_) => "not_found",
            Error::Json(_) => "json_error",
            Error::InvalidTransition(_) => "invalid_transition",
            Error::TerminalState(_) => "terminal_state",
            Error::DuplicateGrade => "duplicate_grade",
            Error::MissingScore => "missing_score",
            Error::InvalidDeliveryTransition(_, _) => "invalid_delivery_transition",
            Error::EmptyBatch => "empty_batch",
            Error::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            Error::MissingField(_)
            | Error::Validation(_)
            | Error::EmptyBatch
            | Error::Json(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidTransition(_)
            | Error::TerminalState(_)
            | Error::DuplicateGrade
            | Error::MissingScore
            | Error::InvalidDeliveryTransition(_, _) => StatusCode::CONFLICT,
            Error::Config(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string(), "code": self.code() }));
        (status, body).into_response()
    }
}
