use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use raisedup_core::error::ErrorBody;

/// API error variants.
///
/// Display strings are the messages the front-end shows verbatim.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Profile not found")]
    ProfileNotFound,
    #[error("Course not found")]
    CourseNotFound,
    #[error("Lesson not found")]
    LessonNotFound,
    #[error("Quiz not found")]
    QuizNotFound,
    /// Path id that cannot name any row.
    #[error("Resource not found")]
    NotFound,
    #[error("Invalid request body")]
    InvalidBody(String),
    #[error("{0}")]
    MissingData(&'static str),
    #[error("Invalid role: {0}")]
    InvalidRole(String),
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),
    #[error("Passing score must be between 0 and 100")]
    InvalidPassingScore,
    #[error("Unauthorized")]
    Forbidden,
    #[error("Stripe is not configured")]
    PaymentNotConfigured,
    #[error("Payment not completed")]
    PaymentNotCompleted { status: String },
    #[error("Failed to create payment session")]
    CheckoutFailed(String),
    #[error("Failed to verify payment")]
    VerificationFailed(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::CourseNotFound => "COURSE_NOT_FOUND",
            Self::LessonNotFound => "LESSON_NOT_FOUND",
            Self::QuizNotFound => "QUIZ_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::MissingData(_) => "MISSING_DATA",
            Self::InvalidRole(_) => "INVALID_ROLE",
            Self::InvalidQuestion(_) => "INVALID_QUESTION",
            Self::InvalidPassingScore => "INVALID_PASSING_SCORE",
            Self::Forbidden => "FORBIDDEN",
            Self::PaymentNotConfigured => "PAYMENT_NOT_CONFIGURED",
            Self::PaymentNotCompleted { .. } => "PAYMENT_NOT_COMPLETED",
            Self::CheckoutFailed(_) | Self::VerificationFailed(_) => "PAYMENT_PROVIDER",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::ProfileNotFound
            | Self::CourseNotFound
            | Self::LessonNotFound
            | Self::QuizNotFound
            | Self::NotFound => StatusCode::NOT_FOUND,
            Self::MissingData(_)
            | Self::InvalidBody(_)
            | Self::InvalidRole(_)
            | Self::InvalidQuestion(_)
            | Self::InvalidPassingScore
            | Self::PaymentNotConfigured
            | Self::PaymentNotCompleted { .. }
            | Self::CheckoutFailed(_)
            | Self::VerificationFailed(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        let mut body = ErrorBody::new(self.kind(), self.to_string());
        match self {
            Self::CheckoutFailed(details)
            | Self::VerificationFailed(details)
            | Self::InvalidBody(details) => {
                body = body.with_details(details);
            }
            Self::PaymentNotCompleted { status } => {
                body = body.with_provider_status(status);
            }
            _ => {}
        }
        body.into_response_with(status)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(_) => Self::NotFound,
            other => Self::Internal(anyhow::anyhow!(other.body_text())),
        }
    }
}
