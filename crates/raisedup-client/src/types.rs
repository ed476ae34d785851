//! Wire types for the RaisedUp API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Caller identity for authenticated requests.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub user_id: Uuid,
}

// ── Profiles ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnsureProfile {
    pub user_id: Uuid,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

// ── Courses & lessons ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
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

/// Body for course create and update; unset fields are omitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CourseFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Lesson {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub video_url: Option<String>,
    pub duration: Option<i32>,
    pub order_index: i32,
    pub is_locked: bool,
    pub created_at: DateTime<Utc>,
}

/// Body for lesson create and update. `course_id` is ignored on update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LessonFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Message {
    pub message: String,
}

// ── Quizzes ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuizQuestion {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: i32,
    pub order_index: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Quiz {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub passing_score: i32,
    pub attempts_allowed: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub quiz_questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Option index or the exact option text.
    pub correct_answer: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewQuiz {
    pub course_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passing_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts_allowed: Option<i32>,
    pub questions: Vec<NewQuestion>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuizResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quiz_id: Uuid,
    pub score: i32,
    pub total_questions: i32,
    pub passed: bool,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmission {
    #[serde(flatten)]
    pub result: QuizResult,
    pub score_percentage: u32,
    pub correct_answers: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CourseTitle {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultQuiz {
    pub title: String,
    pub course_id: Uuid,
    pub courses: CourseTitle,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuizResultWithQuiz {
    #[serde(flatten)]
    pub result: QuizResult,
    pub quizzes: ResultQuiz,
}

// ── Progress ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Progress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub lesson_id: Uuid,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub total_lessons: u32,
    pub completed_lessons: u32,
    pub progress_percentage: u32,
    pub lessons: Vec<Progress>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProgressLesson {
    pub title: String,
    pub course_id: Uuid,
    pub courses: CourseTitle,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProgressWithLesson {
    #[serde(flatten)]
    pub progress: Progress,
    pub lessons: ProgressLesson,
}

// ── Payments & enrollments ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub session_id: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Verification {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentCourse {
    pub title: String,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub amount: f64,
    pub status: String,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
    pub courses: PaymentCourse,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Enrollment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnrollResult {
    pub enrolled: bool,
    pub created: bool,
    #[serde(default)]
    pub enrollment: Option<Enrollment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnrollmentWithCourse {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub courses: Course,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EnrollmentStatus {
    pub enrolled: bool,
}
