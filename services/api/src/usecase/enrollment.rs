use uuid::Uuid;

use crate::domain::repository::{CourseRepository, EnrollmentRepository};
use crate::domain::types::{EnrollOutcome, EnrollmentWithCourse};
use crate::error::ApiError;

// ── Enroll ───────────────────────────────────────────────────────────────────

pub struct EnrollUseCase<R: EnrollmentRepository, C: CourseRepository> {
    pub repo: R,
    pub courses: C,
}

impl<R: EnrollmentRepository, C: CourseRepository> EnrollUseCase<R, C> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        course_id: Option<Uuid>,
    ) -> Result<EnrollOutcome, ApiError> {
        let course_id = course_id.ok_or(ApiError::MissingData("Course ID is required"))?;
        if self.courses.find_by_id(course_id).await?.is_none() {
            return Err(ApiError::CourseNotFound);
        }
        self.repo.create(user_id, course_id).await
    }
}

// ── ListEnrollments ──────────────────────────────────────────────────────────

pub struct ListEnrollmentsUseCase<R: EnrollmentRepository> {
    pub repo: R,
}

impl<R: EnrollmentRepository> ListEnrollmentsUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<EnrollmentWithCourse>, ApiError> {
        self.repo.list_with_course(user_id).await
    }
}

// ── IsEnrolled ───────────────────────────────────────────────────────────────

pub struct IsEnrolledUseCase<R: EnrollmentRepository> {
    pub repo: R,
}

impl<R: EnrollmentRepository> IsEnrolledUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, course_id: Uuid) -> Result<bool, ApiError> {
        self.repo.exists(user_id, course_id).await
    }
}
