#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use raisedup_api::domain::repository::{
    CourseRepository, EnrollmentRepository, GatewayError, LessonRepository, PaymentGateway,
    PaymentRepository, ProfileRepository, ProgressRepository, QuizRepository,
};
use raisedup_api::domain::types::{
    CheckoutRequest, CheckoutSession, Course, CoursePatch, EnrollOutcome, Enrollment,
    EnrollmentWithCourse, Lesson, LessonPatch, NewQuiz, Payment, PaymentWithCourse, Profile,
    ProfilePatch, Progress, ProgressWithLesson, Quiz, QuizQuestion, QuizResult,
    QuizResultWithQuiz, SessionStatus,
};
use raisedup_api::error::ApiError;
use raisedup_domain::payment::CheckoutPaymentStatus;
use raisedup_domain::role::ProfileRole;

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_profile(email: &str) -> Profile {
    Profile {
        id: Uuid::new_v4(),
        email: email.to_owned(),
        name: email.split('@').next().unwrap_or(email).to_owned(),
        role: ProfileRole::Student,
        avatar_url: None,
        created_at: Utc::now(),
    }
}

pub fn test_course(instructor_id: Uuid, price: f64) -> Course {
    Course {
        id: Uuid::new_v4(),
        title: "Rust for Beginners".to_owned(),
        description: Some("Ownership, borrowing and lifetimes".to_owned()),
        price,
        thumbnail_url: None,
        duration: Some("6h".to_owned()),
        instructor_id,
        created_at: Utc::now(),
    }
}

pub fn test_lesson(course_id: Uuid, order_index: i32) -> Lesson {
    Lesson {
        id: Uuid::new_v4(),
        course_id,
        title: format!("Lesson {order_index}"),
        video_url: None,
        duration: Some(600),
        order_index,
        is_locked: false,
        created_at: Utc::now(),
    }
}

/// Quiz whose `i`-th question has `keys[i]` as its correct option.
pub fn test_quiz(course_id: Uuid, keys: &[i32], passing_score: i32) -> Quiz {
    let quiz_id = Uuid::new_v4();
    Quiz {
        id: quiz_id,
        course_id,
        title: "Checkpoint".to_owned(),
        description: None,
        passing_score,
        attempts_allowed: None,
        created_at: Utc::now(),
        questions: keys
            .iter()
            .enumerate()
            .map(|(i, key)| QuizQuestion {
                id: Uuid::new_v4(),
                quiz_id,
                question: format!("Question {i}"),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct_answer: *key,
                order_index: i as i32,
            })
            .collect(),
    }
}

// ── MockProfileRepo ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockProfileRepo {
    pub profiles: Arc<Mutex<Vec<Profile>>>,
    /// Simulates a concurrent insert: `create_if_absent` stores this profile
    /// instead and reports a conflict.
    pub race_winner: Option<Profile>,
}

impl MockProfileRepo {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: Arc::new(Mutex::new(profiles)),
            race_winner: None,
        }
    }
}

impl ProfileRepository for MockProfileRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, ApiError> {
        Ok(self.profiles.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn create_if_absent(&self, profile: &Profile) -> Result<bool, ApiError> {
        let mut profiles = self.profiles.lock().unwrap();
        if let Some(winner) = &self.race_winner {
            profiles.push(winner.clone());
            return Ok(false);
        }
        if profiles.iter().any(|p| p.id == profile.id) {
            return Ok(false);
        }
        profiles.push(profile.clone());
        Ok(true)
    }

    async fn update(&self, id: Uuid, patch: &ProfilePatch) -> Result<Option<Profile>, ApiError> {
        let mut profiles = self.profiles.lock().unwrap();
        let Some(p) = profiles.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(email) = &patch.email {
            p.email = email.clone();
        }
        if let Some(name) = &patch.name {
            p.name = name.clone();
        }
        if let Some(role) = patch.role {
            p.role = role;
        }
        if let Some(url) = &patch.avatar_url {
            p.avatar_url = Some(url.clone());
        }
        Ok(Some(p.clone()))
    }

    async fn list(&self) -> Result<Vec<Profile>, ApiError> {
        let mut profiles = self.profiles.lock().unwrap().clone();
        profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(profiles)
    }
}

// ── MockCourseRepo ───────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockCourseRepo {
    pub courses: Arc<Mutex<Vec<Course>>>,
}

impl MockCourseRepo {
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses: Arc::new(Mutex::new(courses)),
        }
    }
}

impl CourseRepository for MockCourseRepo {
    async fn list(&self) -> Result<Vec<Course>, ApiError> {
        let mut courses = self.courses.lock().unwrap().clone();
        courses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(courses)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, ApiError> {
        Ok(self.courses.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, course: &Course) -> Result<(), ApiError> {
        self.courses.lock().unwrap().push(course.clone());
        Ok(())
    }

    async fn update_owned(
        &self,
        id: Uuid,
        instructor_id: Uuid,
        patch: &CoursePatch,
    ) -> Result<Option<Course>, ApiError> {
        let mut courses = self.courses.lock().unwrap();
        let Some(c) = courses
            .iter_mut()
            .find(|c| c.id == id && c.instructor_id == instructor_id)
        else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            c.title = title.clone();
        }
        if let Some(description) = &patch.description {
            c.description = Some(description.clone());
        }
        if let Some(price) = patch.price {
            c.price = price;
        }
        if let Some(url) = &patch.thumbnail_url {
            c.thumbnail_url = Some(url.clone());
        }
        if let Some(duration) = &patch.duration {
            c.duration = Some(duration.clone());
        }
        Ok(Some(c.clone()))
    }

    async fn delete_owned(&self, id: Uuid, instructor_id: Uuid) -> Result<bool, ApiError> {
        let mut courses = self.courses.lock().unwrap();
        let before = courses.len();
        courses.retain(|c| !(c.id == id && c.instructor_id == instructor_id));
        Ok(courses.len() < before)
    }
}

// ── MockLessonRepo ───────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockLessonRepo {
    pub lessons: Arc<Mutex<Vec<Lesson>>>,
}

impl MockLessonRepo {
    pub fn new(lessons: Vec<Lesson>) -> Self {
        Self {
            lessons: Arc::new(Mutex::new(lessons)),
        }
    }
}

impl LessonRepository for MockLessonRepo {
    async fn list_by_course(&self, course_id: Uuid) -> Result<Vec<Lesson>, ApiError> {
        let mut lessons: Vec<Lesson> = self
            .lessons
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.course_id == course_id)
            .cloned()
            .collect();
        lessons.sort_by_key(|l| l.order_index);
        Ok(lessons)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Lesson>, ApiError> {
        Ok(self.lessons.lock().unwrap().iter().find(|l| l.id == id).cloned())
    }

    async fn create(&self, lesson: &Lesson) -> Result<(), ApiError> {
        self.lessons.lock().unwrap().push(lesson.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: &LessonPatch) -> Result<Option<Lesson>, ApiError> {
        let mut lessons = self.lessons.lock().unwrap();
        let Some(l) = lessons.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            l.title = title.clone();
        }
        if let Some(url) = &patch.video_url {
            l.video_url = Some(url.clone());
        }
        if let Some(duration) = patch.duration {
            l.duration = Some(duration);
        }
        if let Some(order_index) = patch.order_index {
            l.order_index = order_index;
        }
        if let Some(is_locked) = patch.is_locked {
            l.is_locked = is_locked;
        }
        Ok(Some(l.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut lessons = self.lessons.lock().unwrap();
        let before = lessons.len();
        lessons.retain(|l| l.id != id);
        Ok(lessons.len() < before)
    }

    async fn ids_by_course(&self, course_id: Uuid) -> Result<Vec<Uuid>, ApiError> {
        Ok(self
            .lessons
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.course_id == course_id)
            .map(|l| l.id)
            .collect())
    }
}

// ── MockEnrollmentRepo ───────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockEnrollmentRepo {
    pub enrollments: Arc<Mutex<Vec<Enrollment>>>,
    /// Joined into `list_with_course`.
    pub courses: Vec<Course>,
    pub fail: bool,
}

impl MockEnrollmentRepo {
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl EnrollmentRepository for MockEnrollmentRepo {
    async fn create(&self, user_id: Uuid, course_id: Uuid) -> Result<EnrollOutcome, ApiError> {
        if self.fail {
            return Err(anyhow::anyhow!("connection reset").into());
        }
        let mut enrollments = self.enrollments.lock().unwrap();
        if enrollments
            .iter()
            .any(|e| e.user_id == user_id && e.course_id == course_id)
        {
            return Ok(EnrollOutcome::AlreadyEnrolled);
        }
        let enrollment = Enrollment {
            id: Uuid::new_v4(),
            user_id,
            course_id,
            created_at: Utc::now(),
        };
        enrollments.push(enrollment.clone());
        Ok(EnrollOutcome::Created(enrollment))
    }

    async fn list_with_course(&self, user_id: Uuid) -> Result<Vec<EnrollmentWithCourse>, ApiError> {
        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .filter_map(|e| {
                self.courses
                    .iter()
                    .find(|c| c.id == e.course_id)
                    .map(|c| EnrollmentWithCourse {
                        enrollment: e.clone(),
                        course: c.clone(),
                    })
            })
            .collect())
    }

    async fn exists(&self, user_id: Uuid, course_id: Uuid) -> Result<bool, ApiError> {
        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.user_id == user_id && e.course_id == course_id))
    }
}

// ── MockProgressRepo ─────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockProgressRepo {
    pub rows: Arc<Mutex<Vec<Progress>>>,
    /// Lessons and courses joined into `list_with_lessons`.
    pub lessons: Vec<Lesson>,
    pub courses: Vec<Course>,
}

impl ProgressRepository for MockProgressRepo {
    async fn list_for_lessons(
        &self,
        user_id: Uuid,
        lesson_ids: &[Uuid],
    ) -> Result<Vec<Progress>, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id && lesson_ids.contains(&p.lesson_id))
            .cloned()
            .collect())
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        lesson_id: Uuid,
        completed: bool,
    ) -> Result<Progress, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let completed_at = completed.then(Utc::now);
        if let Some(row) = rows
            .iter_mut()
            .find(|p| p.user_id == user_id && p.lesson_id == lesson_id)
        {
            row.completed = completed;
            row.completed_at = completed_at;
            return Ok(row.clone());
        }
        let row = Progress {
            id: Uuid::new_v4(),
            user_id,
            lesson_id,
            completed,
            completed_at,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn list_with_lessons(&self, user_id: Uuid) -> Result<Vec<ProgressWithLesson>, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .filter_map(|p| {
                let lesson = self.lessons.iter().find(|l| l.id == p.lesson_id)?;
                let course = self.courses.iter().find(|c| c.id == lesson.course_id)?;
                Some(ProgressWithLesson {
                    progress: p.clone(),
                    lesson_title: lesson.title.clone(),
                    course_id: course.id,
                    course_title: course.title.clone(),
                })
            })
            .collect())
    }
}

// ── MockQuizRepo ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockQuizRepo {
    pub quizzes: Arc<Mutex<Vec<Quiz>>>,
    pub results: Arc<Mutex<Vec<QuizResult>>>,
}

impl MockQuizRepo {
    pub fn new(quizzes: Vec<Quiz>) -> Self {
        Self {
            quizzes: Arc::new(Mutex::new(quizzes)),
            ..Self::default()
        }
    }
}

impl QuizRepository for MockQuizRepo {
    async fn find_by_course(&self, course_id: Uuid) -> Result<Option<Quiz>, ApiError> {
        Ok(self
            .quizzes
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.course_id == course_id)
            .min_by_key(|q| q.created_at)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Quiz>, ApiError> {
        Ok(self.quizzes.lock().unwrap().iter().find(|q| q.id == id).cloned())
    }

    async fn create_with_questions(&self, new: &NewQuiz) -> Result<Quiz, ApiError> {
        let quiz_id = Uuid::new_v4();
        let quiz = Quiz {
            id: quiz_id,
            course_id: new.course_id,
            title: new.title.clone(),
            description: new.description.clone(),
            passing_score: new.passing_score,
            attempts_allowed: new.attempts_allowed,
            created_at: Utc::now(),
            questions: new
                .questions
                .iter()
                .enumerate()
                .map(|(i, q)| QuizQuestion {
                    id: Uuid::new_v4(),
                    quiz_id,
                    question: q.question.clone(),
                    options: q.options.clone(),
                    correct_answer: q.correct_answer,
                    order_index: i as i32,
                })
                .collect(),
        };
        self.quizzes.lock().unwrap().push(quiz.clone());
        Ok(quiz)
    }

    async fn insert_result(&self, result: &QuizResult) -> Result<(), ApiError> {
        self.results.lock().unwrap().push(result.clone());
        Ok(())
    }

    async fn list_results(&self, user_id: Uuid) -> Result<Vec<QuizResultWithQuiz>, ApiError> {
        let quizzes = self.quizzes.lock().unwrap();
        let mut results: Vec<QuizResultWithQuiz> = self
            .results
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter_map(|r| {
                let quiz = quizzes.iter().find(|q| q.id == r.quiz_id)?;
                Some(QuizResultWithQuiz {
                    result: r.clone(),
                    quiz_title: quiz.title.clone(),
                    course_id: quiz.course_id,
                    course_title: "Rust for Beginners".to_owned(),
                })
            })
            .collect();
        results.sort_by(|a, b| b.result.submitted_at.cmp(&a.result.submitted_at));
        Ok(results)
    }
}

// ── MockPaymentRepo ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockPaymentRepo {
    pub payments: Arc<Mutex<Vec<Payment>>>,
    pub courses: Vec<Course>,
    pub fail: bool,
}

impl PaymentRepository for MockPaymentRepo {
    async fn create(&self, payment: &Payment) -> Result<(), ApiError> {
        if self.fail {
            return Err(anyhow::anyhow!("payments table unavailable").into());
        }
        self.payments.lock().unwrap().push(payment.clone());
        Ok(())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<PaymentWithCourse>, ApiError> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .filter_map(|p| {
                let course = self.courses.iter().find(|c| c.id == p.course_id)?;
                Some(PaymentWithCourse {
                    payment: p.clone(),
                    course_title: course.title.clone(),
                    course_thumbnail_url: course.thumbnail_url.clone(),
                })
            })
            .collect())
    }
}

// ── MockGateway ──────────────────────────────────────────────────────────────

/// Records checkout requests and answers `retrieve_session` with a fixed
/// status.
#[derive(Clone, Default)]
pub struct MockGateway {
    pub requests: Arc<Mutex<Vec<CheckoutRequest>>>,
    pub session: Option<SessionStatus>,
    pub error: Option<String>,
}

impl MockGateway {
    pub fn with_session(session: SessionStatus) -> Self {
        Self {
            session: Some(session),
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            error: Some(message.to_owned()),
            ..Self::default()
        }
    }
}

pub fn paid_session(user_id: Uuid, course_id: Uuid, amount_total: i64) -> SessionStatus {
    SessionStatus {
        id: "cs_test_paid".to_owned(),
        payment_status: CheckoutPaymentStatus::Paid,
        amount_total: Some(amount_total),
        course_id: Some(course_id.to_string()),
        user_id: Some(user_id.to_string()),
    }
}

impl PaymentGateway for MockGateway {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, GatewayError> {
        if let Some(message) = &self.error {
            return Err(GatewayError(message.clone()));
        }
        self.requests.lock().unwrap().push(request.clone());
        Ok(CheckoutSession {
            id: "cs_test_new".to_owned(),
            url: Some("https://checkout.stripe.test/c/pay/cs_test_new".to_owned()),
        })
    }

    async fn retrieve_session(&self, session_id: &str) -> Result<SessionStatus, GatewayError> {
        if let Some(message) = &self.error {
            return Err(GatewayError(message.clone()));
        }
        self.session
            .clone()
            .ok_or_else(|| GatewayError(format!("No such checkout.session: '{session_id}'")))
    }
}
