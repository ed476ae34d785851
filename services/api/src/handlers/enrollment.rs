use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use raisedup_auth_types::bearer::AuthUser;

use crate::domain::types::{EnrollOutcome, Enrollment, EnrollmentWithCourse};
use crate::error::ApiError;
use crate::handlers::extract::{ApiJson, ApiPath};
use crate::handlers::course::CourseResponse;
use crate::state::AppState;
use crate::usecase::enrollment::{EnrollUseCase, IsEnrolledUseCase, ListEnrollmentsUseCase};

#[derive(Serialize)]
pub struct EnrollmentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    #[serde(serialize_with = "raisedup_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(e: Enrollment) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            course_id: e.course_id,
            created_at: e.created_at,
        }
    }
}

// ── POST /api/enrollments ────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    #[serde(alias = "course_id")]
    pub course_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct EnrollResponse {
    pub enrolled: bool,
    pub created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<EnrollmentResponse>,
}

/// 201 with the new row, or 200 when the caller was already enrolled.
pub async fn enroll(
    user: AuthUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<EnrollRequest>,
) -> Result<(StatusCode, Json<EnrollResponse>), ApiError> {
    let usecase = EnrollUseCase {
        repo: state.enrollment_repo(),
        courses: state.course_repo(),
    };
    let resp = match usecase.execute(user.user_id, body.course_id).await? {
        EnrollOutcome::Created(enrollment) => (
            StatusCode::CREATED,
            Json(EnrollResponse {
                enrolled: true,
                created: true,
                enrollment: Some(enrollment.into()),
            }),
        ),
        EnrollOutcome::AlreadyEnrolled => (
            StatusCode::OK,
            Json(EnrollResponse {
                enrolled: true,
                created: false,
                enrollment: None,
            }),
        ),
    };
    Ok(resp)
}

// ── GET /api/enrollments ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EnrollmentWithCourseResponse {
    #[serde(flatten)]
    pub enrollment: EnrollmentResponse,
    pub courses: CourseResponse,
}

impl From<EnrollmentWithCourse> for EnrollmentWithCourseResponse {
    fn from(e: EnrollmentWithCourse) -> Self {
        Self {
            enrollment: e.enrollment.into(),
            courses: e.course.into(),
        }
    }
}

pub async fn list_enrollments(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<EnrollmentWithCourseResponse>>, ApiError> {
    let usecase = ListEnrollmentsUseCase {
        repo: state.enrollment_repo(),
    };
    let rows = usecase.execute(user.user_id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

// ── GET /api/enrollments/course/{courseId} ───────────────────────────────────

#[derive(Serialize)]
pub struct EnrollmentStatusResponse {
    pub enrolled: bool,
}

pub async fn enrollment_status(
    user: AuthUser,
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<Uuid>,
) -> Result<Json<EnrollmentStatusResponse>, ApiError> {
    let usecase = IsEnrolledUseCase {
        repo: state.enrollment_repo(),
    };
    let enrolled = usecase.execute(user.user_id, course_id).await?;
    Ok(Json(EnrollmentStatusResponse { enrolled }))
}
