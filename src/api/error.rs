use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Infrastructure failures at the HTTP boundary. Check-in outcomes are never
/// represented here.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to load students.")]
    LoadStudents(anyhow::Error),

    #[error("Failed to check in student.")]
    CheckIn(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let cause = match &self {
            ApiError::LoadStudents(e) | ApiError::CheckIn(e) => e,
        };
        error!("{}: {:#}", self, cause);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
