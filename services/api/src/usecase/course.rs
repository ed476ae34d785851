use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::CourseRepository;
use crate::domain::types::{Course, CoursePatch};
use crate::error::ApiError;

// ── ListCourses ──────────────────────────────────────────────────────────────

pub struct ListCoursesUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> ListCoursesUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Course>, ApiError> {
        self.repo.list().await
    }
}

// ── GetCourse ────────────────────────────────────────────────────────────────

pub struct GetCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> GetCourseUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Course, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::CourseNotFound)
    }
}

// ── CreateCourse ─────────────────────────────────────────────────────────────

pub struct CreateCourseInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub thumbnail_url: Option<String>,
    pub duration: Option<String>,
}

pub struct CreateCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> CreateCourseUseCase<R> {
    /// The caller becomes the course's instructor.
    pub async fn execute(
        &self,
        instructor_id: Uuid,
        input: CreateCourseInput,
    ) -> Result<Course, ApiError> {
        let title = input
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(ApiError::MissingData("Title is required"))?;
        let course = Course {
            id: Uuid::now_v7(),
            title,
            description: input.description,
            price: input.price.unwrap_or(0.0),
            thumbnail_url: input.thumbnail_url,
            duration: input.duration,
            instructor_id,
            created_at: Utc::now(),
        };
        self.repo.create(&course).await?;
        Ok(course)
    }
}

// ── UpdateCourse ─────────────────────────────────────────────────────────────

pub struct UpdateCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> UpdateCourseUseCase<R> {
    /// A missing course and one owned by someone else both yield
    /// `CourseNotFound`.
    pub async fn execute(
        &self,
        id: Uuid,
        caller: Uuid,
        patch: CoursePatch,
    ) -> Result<Course, ApiError> {
        if patch.is_empty() {
            return Err(ApiError::MissingData("No course fields to update"));
        }
        self.repo
            .update_owned(id, caller, &patch)
            .await?
            .ok_or(ApiError::CourseNotFound)
    }
}

// ── DeleteCourse ─────────────────────────────────────────────────────────────

pub struct DeleteCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> DeleteCourseUseCase<R> {
    pub async fn execute(&self, id: Uuid, caller: Uuid) -> Result<(), ApiError> {
        if !self.repo.delete_owned(id, caller).await? {
            return Err(ApiError::CourseNotFound);
        }
        Ok(())
    }
}
