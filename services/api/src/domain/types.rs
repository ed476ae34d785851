use chrono::{DateTime, Utc};
use uuid::Uuid;

use raisedup_domain::payment::CheckoutPaymentStatus;
use raisedup_domain::role::ProfileRole;

// ── Profiles ─────────────────────────────────────────────────────────────────

/// Application profile; `id` equals the identity provider's user id.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: ProfileRole,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial update of the caller's own profile. `None` leaves a column as is.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<ProfileRole>,
    pub avatar_url: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.role.is_none() && self.avatar_url.is_none()
    }
}

// ── Courses ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub thumbnail_url: Option<String>,
    pub duration: Option<String>,
    pub instructor_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub thumbnail_url: Option<String>,
    pub duration: Option<String>,
}

impl CoursePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.thumbnail_url.is_none()
            && self.duration.is_none()
    }
}

// ── Lessons ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub video_url: Option<String>,
    /// Seconds.
    pub duration: Option<i32>,
    pub order_index: i32,
    pub is_locked: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct LessonPatch {
    pub title: Option<String>,
    pub video_url: Option<String>,
    pub duration: Option<i32>,
    pub order_index: Option<i32>,
    pub is_locked: Option<bool>,
}

impl LessonPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.video_url.is_none()
            && self.duration.is_none()
            && self.order_index.is_none()
            && self.is_locked.is_none()
    }
}

// ── Enrollments ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Result of an enrollment insert. A duplicate `(user, course)` pair is not
/// an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollOutcome {
    Created(Enrollment),
    AlreadyEnrolled,
}

#[derive(Debug, Clone)]
pub struct EnrollmentWithCourse {
    pub enrollment: Enrollment,
    pub course: Course,
}

// ── Progress ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub lesson_id: Uuid,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Progress row joined with its lesson and course titles.
#[derive(Debug, Clone)]
pub struct ProgressWithLesson {
    pub progress: Progress,
    pub lesson_title: String,
    pub course_id: Uuid,
    pub course_title: String,
}

// ── Quizzes ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub question: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct_answer: i32,
    pub order_index: i32,
}

/// Quiz with its questions sorted by `order_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub passing_score: i32,
    pub attempts_allowed: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone)]
pub struct NewQuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: i32,
}

#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub passing_score: i32,
    pub attempts_allowed: Option<i32>,
    /// Stored with `order_index` equal to the position in this list.
    pub questions: Vec<NewQuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quiz_id: Uuid,
    pub score: i32,
    pub total_questions: i32,
    pub passed: bool,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct QuizResultWithQuiz {
    pub result: QuizResult,
    pub quiz_title: String,
    pub course_id: Uuid,
    pub course_title: String,
}

// ── Payments ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub amount: f64,
    pub status: String,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PaymentWithCourse {
    pub payment: Payment,
    pub course_title: String,
    pub course_thumbnail_url: Option<String>,
}

/// Parameters of a single-item hosted checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub product_name: String,
    pub product_description: String,
    pub image_url: Option<String>,
    /// Minor units (cents).
    pub unit_amount: i64,
    pub currency: &'static str,
    pub success_url: String,
    pub cancel_url: String,
    pub course_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

/// Checkout session as reported back by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    pub id: String,
    pub payment_status: CheckoutPaymentStatus,
    /// Minor units; absent for sessions without a total.
    pub amount_total: Option<i64>,
    pub course_id: Option<String>,
    pub user_id: Option<String>,
}
