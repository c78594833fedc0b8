use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use checkind::api::{build_router, AppState};
use checkind::model::Student;
use checkind::service::CheckInService;
use checkind::store::Store;
use serde_json::json;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn router_with(prefix: &str, students: &[Student]) -> Router {
    let store = Store::open(&temp_dir(prefix), Duration::from_secs(5)).expect("open store");
    if !students.is_empty() {
        store.upsert_batch(students).expect("seed students");
    }
    build_router(AppState::new(CheckInService::new(store)))
}

async fn call(router: &Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    let resp = router.clone().oneshot(req).await.expect("response");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        json!(null)
    } else {
        serde_json::from_slice(&bytes).unwrap_or(json!(null))
    };
    (status, value)
}

#[tokio::test]
async fn check_in_maps_outcomes_to_status_codes() {
    let router = router_with(
        "checkind-http-ana",
        &[Student::new("Ana Cruz", "2024-001", false)],
    );

    let (status, body) = call(&router, "PATCH", "/api/students/2024-001/check-in").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "checked_in",
            "student": { "name": "Ana Cruz", "studentNumber": "2024-001", "checkIn": true }
        })
    );

    let (status, body) = call(&router, "PATCH", "/api/students/2024-001/check-in").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "already_checked_in");
    assert_eq!(body["student"]["checkIn"], true);

    let (status, body) = call(&router, "PATCH", "/api/students/9999-999/check-in").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "status": "not_found", "error": "Student not found." })
    );
}

#[tokio::test]
async fn listing_returns_sorted_students_and_reflects_check_in() {
    let router = router_with(
        "checkind-http-list",
        &[
            Student::new("Lee", "002", false),
            Student::new("Kim", "001", false),
        ],
    );

    let (status, body) = call(&router, "GET", "/api/students").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "students": [
                { "name": "Kim", "studentNumber": "001", "checkIn": false },
                { "name": "Lee", "studentNumber": "002", "checkIn": false }
            ]
        })
    );

    let (status, _) = call(&router, "PATCH", "/api/students/002/check-in").await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(&router, "GET", "/api/students").await;
    assert_eq!(body["students"][1]["checkIn"], true);
    assert_eq!(body["students"][0]["checkIn"], false);
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let router = router_with("checkind-http-empty", &[]);

    let (status, body) = call(&router, "GET", "/api/students").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "students": [] }));
}

#[tokio::test]
async fn path_parameter_is_used_verbatim() {
    let router = router_with(
        "checkind-http-verbatim",
        &[Student::new("Ana Cruz", "2024-001", false)],
    );

    let (status, _) = call(&router, "PATCH", "/api/students/%202024-001/check-in").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = call(&router, "GET", "/api/students").await;
    assert_eq!(body["students"][0]["checkIn"], false);
}

#[tokio::test]
async fn storage_failure_maps_to_server_error() {
    let missing = temp_dir("checkind-http-down").join("gone").join("checkin.sqlite3");
    let router = build_router(AppState::new(CheckInService::new(Store::at(
        missing,
        Duration::from_millis(100),
    ))));

    let (status, body) = call(&router, "GET", "/api/students").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to load students." }));

    let (status, body) = call(&router, "PATCH", "/api/students/2024-001/check-in").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to check in student." }));
}

#[tokio::test]
async fn index_page_and_health_are_served() {
    let router = router_with("checkind-http-index", &[]);

    let req = Request::builder().uri("/").body(Body::empty()).expect("request");
    let resp = router.clone().oneshot(req).await.expect("response");
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let html = String::from_utf8(bytes.to_vec()).expect("utf8");
    assert!(html.contains("/api/students"));

    let (status, body) = call(&router, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
