use axum::http::StatusCode;

/// Handler for `GET /healthz`: the process is up and serving.
///
/// Readiness depends on per-service resources (the database pool for the
/// API), so each service supplies its own `/readyz`.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
