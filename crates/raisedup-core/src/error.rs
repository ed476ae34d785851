use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON error envelope returned by every RaisedUp endpoint.
///
/// `error` is the human-readable message the front-end shows in form banners;
/// `kind` is a stable machine-readable code. `details` carries upstream
/// provider messages (payment failures) and `status` the provider's payment
/// status for unpaid checkouts; both are omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(rename = "status", skip_serializing_if = "Option::is_none")]
    pub provider_status: Option<String>,
}

impl ErrorBody {
    pub fn new(kind: &'static str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            kind,
            details: None,
            provider_status: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_provider_status(mut self, status: impl Into<String>) -> Self {
        self.provider_status = Some(status.into());
        self
    }

    /// Render with the given status code. Logging is left to the caller;
    /// tower-http `TraceLayer` already records method/uri/status.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, axum::Json(self)).into_response()
    }
}
