use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, patch},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers::{core, students};
use super::types::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::PATCH, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(core::index_page))
        .route("/health", get(core::health))
        .route("/api/students", get(students::list))
        .route(
            "/api/students/{student_number}/check-in",
            patch(students::check_in),
        )
        .layer(cors)
        .with_state(state)
}
