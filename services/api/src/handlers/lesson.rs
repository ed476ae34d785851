use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use raisedup_auth_types::bearer::AuthUser;

use crate::domain::types::{Lesson, LessonPatch};
use crate::error::ApiError;
use crate::handlers::extract::{ApiJson, ApiPath};
use crate::handlers::MessageResponse;
use crate::state::AppState;
use crate::usecase::lesson::{
    CreateLessonInput, CreateLessonUseCase, DeleteLessonUseCase, GetLessonUseCase,
    ListLessonsUseCase, UpdateLessonUseCase,
};

#[derive(Serialize)]
pub struct LessonResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub video_url: Option<String>,
    pub duration: Option<i32>,
    pub order_index: i32,
    pub is_locked: bool,
    #[serde(serialize_with = "raisedup_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Lesson> for LessonResponse {
    fn from(l: Lesson) -> Self {
        Self {
            id: l.id,
            course_id: l.course_id,
            title: l.title,
            video_url: l.video_url,
            duration: l.duration,
            order_index: l.order_index,
            is_locked: l.is_locked,
            created_at: l.created_at,
        }
    }
}

// ── GET /api/lessons/course/{courseId} ───────────────────────────────────────

pub async fn list_lessons(
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<Uuid>,
) -> Result<Json<Vec<LessonResponse>>, ApiError> {
    let usecase = ListLessonsUseCase {
        repo: state.lesson_repo(),
    };
    let lessons = usecase.execute(course_id).await?;
    Ok(Json(lessons.into_iter().map(Into::into).collect()))
}

// ── GET /api/lessons/{id} ────────────────────────────────────────────────────

pub async fn get_lesson(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<LessonResponse>, ApiError> {
    let usecase = GetLessonUseCase {
        repo: state.lesson_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /api/lessons ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateLessonRequest {
    pub course_id: Option<Uuid>,
    pub title: Option<String>,
    pub video_url: Option<String>,
    pub duration: Option<i32>,
    pub order_index: Option<i32>,
    pub is_locked: Option<bool>,
}

pub async fn create_lesson(
    user: AuthUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateLessonRequest>,
) -> Result<(StatusCode, Json<LessonResponse>), ApiError> {
    let usecase = CreateLessonUseCase {
        repo: state.lesson_repo(),
        courses: state.course_repo(),
    };
    let lesson = usecase
        .execute(
            user.user_id,
            CreateLessonInput {
                course_id: body.course_id,
                title: body.title,
                video_url: body.video_url,
                duration: body.duration,
                order_index: body.order_index,
                is_locked: body.is_locked,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(lesson.into())))
}

// ── PATCH /api/lessons/{id} ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateLessonRequest {
    pub title: Option<String>,
    pub video_url: Option<String>,
    pub duration: Option<i32>,
    pub order_index: Option<i32>,
    pub is_locked: Option<bool>,
}

pub async fn update_lesson(
    user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateLessonRequest>,
) -> Result<Json<LessonResponse>, ApiError> {
    let usecase = UpdateLessonUseCase {
        repo: state.lesson_repo(),
        courses: state.course_repo(),
    };
    let lesson = usecase
        .execute(
            id,
            user.user_id,
            LessonPatch {
                title: body.title,
                video_url: body.video_url,
                duration: body.duration,
                order_index: body.order_index,
                is_locked: body.is_locked,
            },
        )
        .await?;
    Ok(Json(lesson.into()))
}

// ── DELETE /api/lessons/{id} ─────────────────────────────────────────────────

pub async fn delete_lesson(
    user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = DeleteLessonUseCase {
        repo: state.lesson_repo(),
        courses: state.course_repo(),
    };
    usecase.execute(id, user.user_id).await?;
    Ok(Json(MessageResponse {
        message: "Lesson deleted successfully",
    }))
}
