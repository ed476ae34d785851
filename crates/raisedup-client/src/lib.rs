//! Typed async client for the RaisedUp API.
//!
//! Every authenticated call takes an explicit [`Session`]; the client keeps
//! no login state of its own.

mod backoff;
mod error;
mod types;

pub use backoff::Backoff;
pub use error::ClientError;
pub use types::*;

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn request(&self, method: Method, path: &str, session: Option<&Session>) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{path}", self.base_url));
        match session {
            Some(s) => builder.bearer_auth(&s.access_token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
        let resp = builder.send().await?;
        Self::read(resp).await
    }

    async fn read<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }
        let message = resp
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(str::to_owned))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_owned());
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        session: Option<&Session>,
    ) -> Result<T, ClientError> {
        Self::send(self.request(Method::GET, path, session)).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        session: Option<&Session>,
        body: &B,
    ) -> Result<T, ClientError> {
        Self::send(self.request(Method::POST, path, session).json(body)).await
    }

    async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        session: &Session,
        body: &B,
    ) -> Result<T, ClientError> {
        Self::send(self.request(Method::PATCH, path, Some(session)).json(body)).await
    }

    async fn delete(&self, path: &str, session: &Session) -> Result<Message, ClientError> {
        Self::send(self.request(Method::DELETE, path, Some(session))).await
    }

    // ── Profiles ─────────────────────────────────────────────────────────────

    pub async fn ensure_profile(&self, input: &EnsureProfile) -> Result<Profile, ClientError> {
        self.post("/api/auth/ensure-profile", None, input).await
    }

    pub async fn get_profile(&self, session: &Session) -> Result<Profile, ClientError> {
        self.get("/api/auth/profile", Some(session)).await
    }

    /// Fetch the caller's profile, retrying while it does not exist yet.
    ///
    /// Only 404 is retried; any other error is returned at once. After
    /// `backoff.max_attempts` misses the result is
    /// [`ClientError::ProfileNotReady`].
    pub async fn fetch_profile_with_retry(
        &self,
        session: &Session,
        backoff: Backoff,
    ) -> Result<Profile, ClientError> {
        let attempts = backoff.max_attempts.max(1);
        for attempt in 0..attempts {
            match self.get_profile(session).await {
                Ok(profile) => return Ok(profile),
                Err(e) if e.is_not_found() => {
                    if attempt + 1 < attempts {
                        let delay = backoff.delay(attempt);
                        tracing::debug!(
                            user_id = %session.user_id,
                            attempt = attempt + 1,
                            ?delay,
                            "profile not found, retrying"
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }
        Err(ClientError::ProfileNotReady { attempts })
    }

    pub async fn update_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<Profile, ClientError> {
        self.patch("/api/auth/profile", session, update).await
    }

    pub async fn list_users(&self, session: &Session) -> Result<Vec<Profile>, ClientError> {
        self.get("/api/auth/users", Some(session)).await
    }

    // ── Courses ──────────────────────────────────────────────────────────────

    pub async fn list_courses(&self) -> Result<Vec<Course>, ClientError> {
        self.get("/api/courses", None).await
    }

    pub async fn get_course(&self, id: Uuid) -> Result<Course, ClientError> {
        self.get(&format!("/api/courses/{id}"), None).await
    }

    pub async fn create_course(
        &self,
        session: &Session,
        fields: &CourseFields,
    ) -> Result<Course, ClientError> {
        self.post("/api/courses", Some(session), fields).await
    }

    pub async fn update_course(
        &self,
        session: &Session,
        id: Uuid,
        fields: &CourseFields,
    ) -> Result<Course, ClientError> {
        self.patch(&format!("/api/courses/{id}"), session, fields).await
    }

    pub async fn delete_course(&self, session: &Session, id: Uuid) -> Result<Message, ClientError> {
        self.delete(&format!("/api/courses/{id}"), session).await
    }

    // ── Lessons ──────────────────────────────────────────────────────────────

    pub async fn list_lessons(&self, course_id: Uuid) -> Result<Vec<Lesson>, ClientError> {
        self.get(&format!("/api/lessons/course/{course_id}"), None)
            .await
    }

    pub async fn get_lesson(&self, id: Uuid) -> Result<Lesson, ClientError> {
        self.get(&format!("/api/lessons/{id}"), None).await
    }

    pub async fn create_lesson(
        &self,
        session: &Session,
        fields: &LessonFields,
    ) -> Result<Lesson, ClientError> {
        self.post("/api/lessons", Some(session), fields).await
    }

    pub async fn update_lesson(
        &self,
        session: &Session,
        id: Uuid,
        fields: &LessonFields,
    ) -> Result<Lesson, ClientError> {
        self.patch(&format!("/api/lessons/{id}"), session, fields).await
    }

    pub async fn delete_lesson(&self, session: &Session, id: Uuid) -> Result<Message, ClientError> {
        self.delete(&format!("/api/lessons/{id}"), session).await
    }

    // ── Quizzes ──────────────────────────────────────────────────────────────

    pub async fn get_quiz(&self, course_id: Uuid) -> Result<Quiz, ClientError> {
        self.get(&format!("/api/quiz/course/{course_id}"), None).await
    }

    pub async fn create_quiz(&self, session: &Session, quiz: &NewQuiz) -> Result<Quiz, ClientError> {
        self.post("/api/quiz", Some(session), quiz).await
    }

    /// `answers[i]` is the chosen option index for question `i`.
    pub async fn submit_quiz(
        &self,
        session: &Session,
        quiz_id: Uuid,
        answers: &[Option<i64>],
    ) -> Result<QuizSubmission, ClientError> {
        let body = json!({ "quiz_id": quiz_id, "answers": answers });
        self.post("/api/quiz/submit", Some(session), &body).await
    }

    pub async fn quiz_results(
        &self,
        session: &Session,
    ) -> Result<Vec<QuizResultWithQuiz>, ClientError> {
        self.get("/api/quiz/results", Some(session)).await
    }

    // ── Progress ─────────────────────────────────────────────────────────────

    /// Progress of the session's user in one course.
    pub async fn course_progress(
        &self,
        session: &Session,
        course_id: Uuid,
    ) -> Result<CourseProgress, ClientError> {
        let path = format!("/api/progress/{}/{course_id}", session.user_id);
        self.get(&path, Some(session)).await
    }

    pub async fn update_progress(
        &self,
        session: &Session,
        lesson_id: Uuid,
        completed: bool,
    ) -> Result<Progress, ClientError> {
        let body = json!({ "lesson_id": lesson_id, "completed": completed });
        self.post("/api/progress/update", Some(session), &body).await
    }

    pub async fn all_progress(
        &self,
        session: &Session,
    ) -> Result<Vec<ProgressWithLesson>, ClientError> {
        self.get("/api/progress/user", Some(session)).await
    }

    // ── Payments ─────────────────────────────────────────────────────────────

    pub async fn create_checkout(
        &self,
        session: &Session,
        course_id: Uuid,
    ) -> Result<CheckoutSession, ClientError> {
        let body = json!({ "courseId": course_id });
        self.post("/api/payment/create-checkout", Some(session), &body)
            .await
    }

    pub async fn verify_payment(
        &self,
        session: &Session,
        checkout_session_id: &str,
    ) -> Result<Verification, ClientError> {
        let body = json!({ "sessionId": checkout_session_id });
        self.post("/api/payment/verify", Some(session), &body).await
    }

    pub async fn user_payments(&self, session: &Session) -> Result<Vec<Payment>, ClientError> {
        self.get("/api/payment/user", Some(session)).await
    }

    // ── Enrollments ──────────────────────────────────────────────────────────

    pub async fn enroll(
        &self,
        session: &Session,
        course_id: Uuid,
    ) -> Result<EnrollResult, ClientError> {
        let body = json!({ "courseId": course_id });
        self.post("/api/enrollments", Some(session), &body).await
    }

    pub async fn enrollments(
        &self,
        session: &Session,
    ) -> Result<Vec<EnrollmentWithCourse>, ClientError> {
        self.get("/api/enrollments", Some(session)).await
    }

    pub async fn is_enrolled(&self, session: &Session, course_id: Uuid) -> Result<bool, ClientError> {
        let status: EnrollmentStatus = self
            .get(&format!("/api/enrollments/course/{course_id}"), Some(session))
            .await?;
        Ok(status.enrolled)
    }
}
