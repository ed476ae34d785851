use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{CourseRepository, LessonRepository};
use crate::domain::types::{Lesson, LessonPatch};
use crate::error::ApiError;

/// Fail unless `caller` is the instructor of `course_id`.
async fn ensure_course_owner<C: CourseRepository>(
    courses: &C,
    course_id: Uuid,
    caller: Uuid,
) -> Result<(), ApiError> {
    let course = courses
        .find_by_id(course_id)
        .await?
        .ok_or(ApiError::CourseNotFound)?;
    if course.instructor_id != caller {
        return Err(ApiError::Forbidden);
    }
    Ok(())
}

// ── ListLessons ──────────────────────────────────────────────────────────────

pub struct ListLessonsUseCase<R: LessonRepository> {
    pub repo: R,
}

impl<R: LessonRepository> ListLessonsUseCase<R> {
    pub async fn execute(&self, course_id: Uuid) -> Result<Vec<Lesson>, ApiError> {
        self.repo.list_by_course(course_id).await
    }
}

// ── GetLesson ────────────────────────────────────────────────────────────────

pub struct GetLessonUseCase<R: LessonRepository> {
    pub repo: R,
}

impl<R: LessonRepository> GetLessonUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Lesson, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::LessonNotFound)
    }
}

// ── CreateLesson ─────────────────────────────────────────────────────────────

pub struct CreateLessonInput {
    pub course_id: Option<Uuid>,
    pub title: Option<String>,
    pub video_url: Option<String>,
    pub duration: Option<i32>,
    pub order_index: Option<i32>,
    pub is_locked: Option<bool>,
}

pub struct CreateLessonUseCase<R: LessonRepository, C: CourseRepository> {
    pub repo: R,
    pub courses: C,
}

impl<R: LessonRepository, C: CourseRepository> CreateLessonUseCase<R, C> {
    pub async fn execute(&self, caller: Uuid, input: CreateLessonInput) -> Result<Lesson, ApiError> {
        let course_id = input
            .course_id
            .ok_or(ApiError::MissingData("Course ID is required"))?;
        let title = input
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(ApiError::MissingData("Title is required"))?;
        ensure_course_owner(&self.courses, course_id, caller).await?;
        let lesson = Lesson {
            id: Uuid::now_v7(),
            course_id,
            title,
            video_url: input.video_url,
            duration: input.duration,
            order_index: input.order_index.unwrap_or(0),
            is_locked: input.is_locked.unwrap_or(false),
            created_at: Utc::now(),
        };
        self.repo.create(&lesson).await?;
        Ok(lesson)
    }
}

// ── UpdateLesson ─────────────────────────────────────────────────────────────

pub struct UpdateLessonUseCase<R: LessonRepository, C: CourseRepository> {
    pub repo: R,
    pub courses: C,
}

impl<R: LessonRepository, C: CourseRepository> UpdateLessonUseCase<R, C> {
    pub async fn execute(
        &self,
        id: Uuid,
        caller: Uuid,
        patch: LessonPatch,
    ) -> Result<Lesson, ApiError> {
        let lesson = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::LessonNotFound)?;
        ensure_course_owner(&self.courses, lesson.course_id, caller).await?;
        if patch.is_empty() {
            return Err(ApiError::MissingData("No lesson fields to update"));
        }
        self.repo
            .update(id, &patch)
            .await?
            .ok_or(ApiError::LessonNotFound)
    }
}

// ── DeleteLesson ─────────────────────────────────────────────────────────────

pub struct DeleteLessonUseCase<R: LessonRepository, C: CourseRepository> {
    pub repo: R,
    pub courses: C,
}

impl<R: LessonRepository, C: CourseRepository> DeleteLessonUseCase<R, C> {
    pub async fn execute(&self, id: Uuid, caller: Uuid) -> Result<(), ApiError> {
        let lesson = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::LessonNotFound)?;
        ensure_course_owner(&self.courses, lesson.course_id, caller).await?;
        if !self.repo.delete(id).await? {
            return Err(ApiError::LessonNotFound);
        }
        Ok(())
    }
}
