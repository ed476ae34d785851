use axum::{
    Json,
    extract::State,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use raisedup_auth_types::bearer::AuthUser;
use raisedup_domain::progress::ProgressSummary;

use crate::domain::types::{Progress, ProgressWithLesson};
use crate::error::ApiError;
use crate::handlers::extract::{ApiJson, ApiPath};
use crate::handlers::quiz::CourseTitle;
use crate::state::AppState;
use crate::usecase::progress::{
    GetAllUserProgressUseCase, GetCourseProgressUseCase, UpdateProgressUseCase,
};

#[derive(Serialize)]
pub struct ProgressResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub lesson_id: Uuid,
    pub completed: bool,
    #[serde(serialize_with = "raisedup_core::serde::opt_to_rfc3339_ms")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<Progress> for ProgressResponse {
    fn from(p: Progress) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            lesson_id: p.lesson_id,
            completed: p.completed,
            completed_at: p.completed_at,
        }
    }
}

// ── GET /api/progress/{userId}/{courseId} ────────────────────────────────────

#[derive(Serialize)]
pub struct CourseProgressResponse {
    #[serde(flatten)]
    pub summary: ProgressSummary,
    pub lessons: Vec<ProgressResponse>,
}

/// Public: the user is addressed by path, not by bearer.
pub async fn get_course_progress(
    State(state): State<AppState>,
    ApiPath((user_id, course_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<CourseProgressResponse>, ApiError> {
    let usecase = GetCourseProgressUseCase {
        repo: state.progress_repo(),
        lessons: state.lesson_repo(),
    };
    let progress = usecase.execute(user_id, course_id).await?;
    Ok(Json(CourseProgressResponse {
        summary: progress.summary,
        lessons: progress.rows.into_iter().map(Into::into).collect(),
    }))
}

// ── POST /api/progress/update ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProgressRequest {
    pub lesson_id: Option<Uuid>,
    pub completed: Option<bool>,
}

pub async fn update_progress(
    user: AuthUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<UpdateProgressRequest>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let usecase = UpdateProgressUseCase {
        repo: state.progress_repo(),
    };
    let row = usecase
        .execute(user.user_id, body.lesson_id, body.completed)
        .await?;
    Ok(Json(row.into()))
}

// ── GET /api/progress/user ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProgressLesson {
    pub title: String,
    pub course_id: Uuid,
    pub courses: CourseTitle,
}

#[derive(Serialize)]
pub struct ProgressWithLessonResponse {
    #[serde(flatten)]
    pub progress: ProgressResponse,
    pub lessons: ProgressLesson,
}

impl From<ProgressWithLesson> for ProgressWithLessonResponse {
    fn from(p: ProgressWithLesson) -> Self {
        Self {
            progress: p.progress.into(),
            lessons: ProgressLesson {
                title: p.lesson_title,
                course_id: p.course_id,
                courses: CourseTitle {
                    title: p.course_title,
                },
            },
        }
    }
}

pub async fn list_user_progress(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProgressWithLessonResponse>>, ApiError> {
    let usecase = GetAllUserProgressUseCase {
        repo: state.progress_repo(),
    };
    let rows = usecase.execute(user.user_id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
