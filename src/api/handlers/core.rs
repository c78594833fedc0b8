use axum::{
    response::{Html, IntoResponse},
    Json,
};
use serde_json::json;

pub async fn index_page() -> impl IntoResponse {
    Html(include_str!("../../web/index.html"))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "version": env!("CARGO_PKG_VERSION") }))
}
