use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::api::error::ApiError;
use crate::api::run_blocking;
use crate::api::types::AppState;
use crate::service::CheckInOutcome;

pub async fn list(State(state): State<AppState>) -> Result<Response, ApiError> {
    let service = state.service.clone();
    let students = run_blocking(move || service.list_students())
        .await
        .map_err(ApiError::LoadStudents)?;

    Ok(Json(json!({ "students": students })).into_response())
}

/// The path segment is used verbatim; no trimming or case folding.
pub async fn check_in(
    State(state): State<AppState>,
    Path(student_number): Path<String>,
) -> Result<Response, ApiError> {
    let service = state.service.clone();
    let outcome = run_blocking(move || service.check_in(&student_number))
        .await
        .map_err(ApiError::CheckIn)?;

    let status = outcome.status();
    let resp = match outcome {
        CheckInOutcome::CheckedIn(student) => (
            StatusCode::OK,
            Json(json!({ "status": status, "student": student })),
        ),
        CheckInOutcome::AlreadyCheckedIn(student) => (
            StatusCode::CONFLICT,
            Json(json!({ "status": status, "student": student })),
        ),
        CheckInOutcome::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "status": status, "error": "Student not found." })),
        ),
    };
    Ok(resp.into_response())
}
