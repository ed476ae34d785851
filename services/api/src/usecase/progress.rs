use uuid::Uuid;

use raisedup_domain::progress::ProgressSummary;

use crate::domain::repository::{LessonRepository, ProgressRepository};
use crate::domain::types::{Progress, ProgressWithLesson};
use crate::error::ApiError;

// ── GetCourseProgress ────────────────────────────────────────────────────────

pub struct CourseProgress {
    pub summary: ProgressSummary,
    pub rows: Vec<Progress>,
}

pub struct GetCourseProgressUseCase<R: ProgressRepository, L: LessonRepository> {
    pub repo: R,
    pub lessons: L,
}

impl<R: ProgressRepository, L: LessonRepository> GetCourseProgressUseCase<R, L> {
    pub async fn execute(&self, user_id: Uuid, course_id: Uuid) -> Result<CourseProgress, ApiError> {
        let lesson_ids = self.lessons.ids_by_course(course_id).await?;
        let rows = if lesson_ids.is_empty() {
            Vec::new()
        } else {
            self.repo.list_for_lessons(user_id, &lesson_ids).await?
        };
        let summary =
            ProgressSummary::from_flags(lesson_ids.len() as u32, rows.iter().map(|p| p.completed));
        Ok(CourseProgress { summary, rows })
    }
}

// ── UpdateProgress ───────────────────────────────────────────────────────────

pub struct UpdateProgressUseCase<R: ProgressRepository> {
    pub repo: R,
}

impl<R: ProgressRepository> UpdateProgressUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        lesson_id: Option<Uuid>,
        completed: Option<bool>,
    ) -> Result<Progress, ApiError> {
        let lesson_id = lesson_id.ok_or(ApiError::MissingData("Lesson ID is required"))?;
        self.repo
            .upsert(user_id, lesson_id, completed.unwrap_or(false))
            .await
    }
}

// ── GetAllUserProgress ───────────────────────────────────────────────────────

pub struct GetAllUserProgressUseCase<R: ProgressRepository> {
    pub repo: R,
}

impl<R: ProgressRepository> GetAllUserProgressUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<ProgressWithLesson>, ApiError> {
        self.repo.list_with_lessons(user_id).await
    }
}
