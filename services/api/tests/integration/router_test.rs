//! Routing and auth behaviour that never reaches the database.

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode, header::AUTHORIZATION};
use axum_test::TestServer;
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase};
use serde_json::{Value, json};
use uuid::Uuid;

use raisedup_api::router::build_router;
use raisedup_api::state::AppState;
use raisedup_auth_types::bearer::JwtSecret;
use raisedup_testing::auth::{MockAuth, TEST_JWT_SECRET};

fn server_with(db: DatabaseConnection) -> TestServer {
    let state = AppState {
        db,
        jwt_secret: JwtSecret::new(TEST_JWT_SECRET),
        stripe: None,
        client_url: Arc::from("http://localhost:5173"),
    };
    TestServer::new(build_router(state)).unwrap()
}

/// Only `ping` is safe on a disconnected handle; requests in this file
/// either fail before storage or use `failing_db`.
fn server() -> TestServer {
    server_with(DatabaseConnection::Disconnected)
}

fn failing_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection refused".into())])
        .into_connection()
}

fn bearer(auth: &MockAuth) -> HeaderValue {
    HeaderValue::from_str(&auth.bearer()).unwrap()
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_serve_healthz_with_request_id() {
    let resp = server().get("/healthz").await;
    resp.assert_status_ok();
    let id = resp.header("x-request-id");
    assert!(id.to_str().unwrap().parse::<Uuid>().is_ok());
}

#[tokio::test]
async fn should_propagate_incoming_request_id() {
    let resp = server()
        .get("/healthz")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-123"),
        )
        .await;
    assert_eq!(resp.header("x-request-id"), "req-123");
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let resp = server().get("/readyz").await;
    resp.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

// ── Bearer auth ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_missing_bearer() {
    let resp = server().get("/api/auth/profile").await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = resp.json();
    assert_eq!(body["error"], "No token provided");
    assert_eq!(body["kind"], "UNAUTHORIZED");
}

#[tokio::test]
async fn should_reject_garbage_bearer() {
    let resp = server()
        .get("/api/progress/user")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer not-a-jwt"))
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json::<Value>()["error"], "Invalid token");
}

#[tokio::test]
async fn should_guard_every_authenticated_route() {
    let server = server();
    let id = Uuid::new_v4();
    let cases = [
        ("GET", "/api/auth/users".to_owned()),
        ("PATCH", "/api/auth/profile".to_owned()),
        ("POST", "/api/courses".to_owned()),
        ("PATCH", format!("/api/courses/{id}")),
        ("DELETE", format!("/api/courses/{id}")),
        ("POST", "/api/lessons".to_owned()),
        ("DELETE", format!("/api/lessons/{id}")),
        ("POST", "/api/quiz".to_owned()),
        ("POST", "/api/quiz/submit".to_owned()),
        ("GET", "/api/quiz/results".to_owned()),
        ("POST", "/api/progress/update".to_owned()),
        ("POST", "/api/payment/create-checkout".to_owned()),
        ("POST", "/api/payment/verify".to_owned()),
        ("GET", "/api/payment/user".to_owned()),
        ("GET", "/api/enrollments".to_owned()),
        ("POST", "/api/enrollments".to_owned()),
        ("GET", format!("/api/enrollments/course/{id}")),
    ];
    for (method, path) in cases {
        let resp = match method {
            "GET" => server.get(&path).await,
            "POST" => server.post(&path).json(&json!({})).await,
            "PATCH" => server.patch(&path).json(&json!({})).await,
            _ => server.delete(&path).await,
        };
        assert_eq!(
            resp.status_code(),
            StatusCode::UNAUTHORIZED,
            "{method} {path} should require a bearer token"
        );
    }
}

// ── Validation before storage ────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_ensure_profile_without_email() {
    let resp = server()
        .post("/api/auth/ensure-profile")
        .json(&json!({ "userId": Uuid::new_v4() }))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["error"], "Missing userId or email");
    assert_eq!(body["kind"], "MISSING_DATA");
}

#[tokio::test]
async fn should_reject_checkout_when_payments_unconfigured() {
    let auth = MockAuth::new(Uuid::new_v4());
    let resp = server()
        .post("/api/payment/create-checkout")
        .add_header(AUTHORIZATION, bearer(&auth))
        .json(&json!({ "courseId": Uuid::new_v4() }))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["error"], "Stripe is not configured");
    assert_eq!(body["kind"], "PAYMENT_NOT_CONFIGURED");
}

#[tokio::test]
async fn should_reject_verify_when_payments_unconfigured() {
    let auth = MockAuth::new(Uuid::new_v4());
    let resp = server()
        .post("/api/payment/verify")
        .add_header(AUTHORIZATION, bearer(&auth))
        .json(&json!({ "sessionId": "cs_test_1" }))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "PAYMENT_NOT_CONFIGURED");
}

#[tokio::test]
async fn should_reject_empty_course_patch() {
    let auth = MockAuth::new(Uuid::new_v4());
    let resp = server()
        .patch(&format!("/api/courses/{}", Uuid::new_v4()))
        .add_header(AUTHORIZATION, bearer(&auth))
        .json(&json!({}))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "MISSING_DATA");
}

#[tokio::test]
async fn should_reject_progress_update_without_lesson() {
    let auth = MockAuth::new(Uuid::new_v4());
    let resp = server()
        .post("/api/progress/update")
        .add_header(AUTHORIZATION, bearer(&auth))
        .json(&json!({ "completed": true }))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["error"], "Lesson ID is required");
}

#[tokio::test]
async fn should_reject_quiz_with_invalid_passing_score() {
    let auth = MockAuth::new(Uuid::new_v4());
    let resp = server()
        .post("/api/quiz")
        .add_header(AUTHORIZATION, bearer(&auth))
        .json(&json!({
            "course_id": Uuid::new_v4(),
            "title": "Final",
            "passing_score": 150,
            "questions": [],
        }))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "INVALID_PASSING_SCORE");
}

#[tokio::test]
async fn should_hide_storage_failure_behind_generic_500() {
    let resp = server_with(failing_db()).get("/api/courses").await;
    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json();
    assert_eq!(body["error"], "internal error");
    assert_eq!(body["kind"], "INTERNAL");
    assert!(!resp.text().contains("connection refused"));
}

// ── Malformed requests ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_answer_unparsable_course_id_with_json_404() {
    let resp = server().get("/api/courses/not-a-uuid").await;
    resp.assert_status(StatusCode::NOT_FOUND);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "NOT_FOUND");
    assert_eq!(body["error"], "Resource not found");
}

#[tokio::test]
async fn should_answer_unparsable_progress_ids_with_json_404() {
    let resp = server()
        .get(&format!("/api/progress/abc/{}", Uuid::new_v4()))
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(resp.json::<Value>()["kind"], "NOT_FOUND");
}

#[tokio::test]
async fn should_reject_wrongly_typed_quiz_answers() {
    let auth = MockAuth::new(Uuid::new_v4());
    let resp = server()
        .post("/api/quiz/submit")
        .add_header(AUTHORIZATION, bearer(&auth))
        .json(&json!({ "quiz_id": Uuid::new_v4(), "answers": ["a"] }))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "INVALID_BODY");
    assert_eq!(body["error"], "Invalid request body");
    assert!(body["details"].as_str().unwrap().contains("answers"));
}

#[tokio::test]
async fn should_reject_malformed_json_syntax() {
    let resp = server()
        .post("/api/auth/ensure-profile")
        .content_type("application/json")
        .bytes("{\"userId\":".into())
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "INVALID_BODY");
}

#[tokio::test]
async fn should_reject_body_without_json_content_type() {
    let resp = server()
        .post("/api/auth/ensure-profile")
        .text("userId=1")
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "INVALID_BODY");
    assert!(body["details"].as_str().unwrap().contains("Content-Type"));
}
