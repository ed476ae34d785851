#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{
    CheckoutRequest, CheckoutSession, Course, CoursePatch, EnrollOutcome, EnrollmentWithCourse,
    Lesson, LessonPatch, NewQuiz, Payment, PaymentWithCourse, Profile, ProfilePatch, Progress,
    ProgressWithLesson, Quiz, QuizResult, QuizResultWithQuiz, SessionStatus,
};
use crate::error::ApiError;

/// Repository for profiles.
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, ApiError>;

    /// Insert unless a row with the same id exists. Returns `true` if this
    /// call created the row.
    async fn create_if_absent(&self, profile: &Profile) -> Result<bool, ApiError>;

    /// Apply `patch` to the profile. Returns `None` if no such profile.
    async fn update(&self, id: Uuid, patch: &ProfilePatch) -> Result<Option<Profile>, ApiError>;

    /// All profiles, newest first.
    async fn list(&self) -> Result<Vec<Profile>, ApiError>;
}

/// Repository for courses.
pub trait CourseRepository: Send + Sync {
    /// All courses, newest first.
    async fn list(&self) -> Result<Vec<Course>, ApiError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, ApiError>;

    async fn create(&self, course: &Course) -> Result<(), ApiError>;

    /// Update the course matching both `id` and `instructor_id`. Returns
    /// `None` when nothing matched.
    async fn update_owned(
        &self,
        id: Uuid,
        instructor_id: Uuid,
        patch: &CoursePatch,
    ) -> Result<Option<Course>, ApiError>;

    /// Delete the course matching both `id` and `instructor_id`. Returns
    /// `true` if a row was deleted.
    async fn delete_owned(&self, id: Uuid, instructor_id: Uuid) -> Result<bool, ApiError>;
}

/// Repository for lessons.
pub trait LessonRepository: Send + Sync {
    /// Lessons of a course by ascending `order_index`.
    async fn list_by_course(&self, course_id: Uuid) -> Result<Vec<Lesson>, ApiError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Lesson>, ApiError>;

    async fn create(&self, lesson: &Lesson) -> Result<(), ApiError>;

    async fn update(&self, id: Uuid, patch: &LessonPatch) -> Result<Option<Lesson>, ApiError>;

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;

    async fn ids_by_course(&self, course_id: Uuid) -> Result<Vec<Uuid>, ApiError>;
}

/// Repository for enrollments.
pub trait EnrollmentRepository: Send + Sync {
    async fn create(&self, user_id: Uuid, course_id: Uuid) -> Result<EnrollOutcome, ApiError>;

    /// The user's enrollments with their course, newest first.
    async fn list_with_course(&self, user_id: Uuid) -> Result<Vec<EnrollmentWithCourse>, ApiError>;

    async fn exists(&self, user_id: Uuid, course_id: Uuid) -> Result<bool, ApiError>;
}

/// Repository for lesson progress.
pub trait ProgressRepository: Send + Sync {
    /// The user's progress rows restricted to `lesson_ids`.
    async fn list_for_lessons(
        &self,
        user_id: Uuid,
        lesson_ids: &[Uuid],
    ) -> Result<Vec<Progress>, ApiError>;

    /// Insert or update the `(user, lesson)` row, returning the stored row.
    async fn upsert(
        &self,
        user_id: Uuid,
        lesson_id: Uuid,
        completed: bool,
    ) -> Result<Progress, ApiError>;

    async fn list_with_lessons(&self, user_id: Uuid) -> Result<Vec<ProgressWithLesson>, ApiError>;
}

/// Repository for quizzes, their questions and results.
pub trait QuizRepository: Send + Sync {
    async fn find_by_course(&self, course_id: Uuid) -> Result<Option<Quiz>, ApiError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Quiz>, ApiError>;

    /// Insert the quiz and its questions atomically.
    async fn create_with_questions(&self, quiz: &NewQuiz) -> Result<Quiz, ApiError>;

    async fn insert_result(&self, result: &QuizResult) -> Result<(), ApiError>;

    /// The user's results, newest first.
    async fn list_results(&self, user_id: Uuid) -> Result<Vec<QuizResultWithQuiz>, ApiError>;
}

/// Repository for payment records.
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: &Payment) -> Result<(), ApiError>;

    /// The user's payments with course title and thumbnail, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<PaymentWithCourse>, ApiError>;
}

/// Error reported by the payment provider, carrying its message.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct GatewayError(pub String);

/// Port for the hosted-checkout payment provider.
pub trait PaymentGateway: Send + Sync {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, GatewayError>;

    async fn retrieve_session(&self, session_id: &str) -> Result<SessionStatus, GatewayError>;
}
