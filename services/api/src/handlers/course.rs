use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use raisedup_auth_types::bearer::AuthUser;

use crate::domain::types::{Course, CoursePatch};
use crate::error::ApiError;
use crate::handlers::extract::{ApiJson, ApiPath};
use crate::handlers::MessageResponse;
use crate::state::AppState;
use crate::usecase::course::{
    CreateCourseInput, CreateCourseUseCase, DeleteCourseUseCase, GetCourseUseCase,
    ListCoursesUseCase, UpdateCourseUseCase,
};

#[derive(Serialize)]
pub struct CourseResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub thumbnail_url: Option<String>,
    pub duration: Option<String>,
    pub instructor_id: Uuid,
    #[serde(serialize_with = "raisedup_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Course> for CourseResponse {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            price: c.price,
            thumbnail_url: c.thumbnail_url,
            duration: c.duration,
            instructor_id: c.instructor_id,
            created_at: c.created_at,
        }
    }
}

// ── GET /api/courses ─────────────────────────────────────────────────────────

pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let usecase = ListCoursesUseCase {
        repo: state.course_repo(),
    };
    let courses = usecase.execute().await?;
    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

// ── GET /api/courses/{id} ────────────────────────────────────────────────────

pub async fn get_course(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<CourseResponse>, ApiError> {
    let usecase = GetCourseUseCase {
        repo: state.course_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /api/courses ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub thumbnail_url: Option<String>,
    pub duration: Option<String>,
}

pub async fn create_course(
    user: AuthUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    let usecase = CreateCourseUseCase {
        repo: state.course_repo(),
    };
    let course = usecase
        .execute(
            user.user_id,
            CreateCourseInput {
                title: body.title,
                description: body.description,
                price: body.price,
                thumbnail_url: body.thumbnail_url,
                duration: body.duration,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(course.into())))
}

// ── PATCH /api/courses/{id} ──────────────────────────────────────────────────

pub async fn update_course(
    user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<CourseRequest>,
) -> Result<Json<CourseResponse>, ApiError> {
    let usecase = UpdateCourseUseCase {
        repo: state.course_repo(),
    };
    let course = usecase
        .execute(
            id,
            user.user_id,
            CoursePatch {
                title: body.title,
                description: body.description,
                price: body.price,
                thumbnail_url: body.thumbnail_url,
                duration: body.duration,
            },
        )
        .await?;
    Ok(Json(course.into()))
}

// ── DELETE /api/courses/{id} ─────────────────────────────────────────────────

pub async fn delete_course(
    user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = DeleteCourseUseCase {
        repo: state.course_repo(),
    };
    usecase.execute(id, user.user_id).await?;
    Ok(Json(MessageResponse {
        message: "Course deleted successfully",
    }))
}
