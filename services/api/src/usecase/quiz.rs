use chrono::Utc;
use uuid::Uuid;

use raisedup_domain::quiz::{AnswerKey, QuizScore, grade};

use crate::domain::repository::{CourseRepository, QuizRepository};
use crate::domain::types::{NewQuiz, NewQuizQuestion, Quiz, QuizResult, QuizResultWithQuiz};
use crate::error::ApiError;

pub const DEFAULT_PASSING_SCORE: i32 = 70;

// ── GetQuizByCourse ──────────────────────────────────────────────────────────

pub struct GetQuizByCourseUseCase<R: QuizRepository> {
    pub repo: R,
}

impl<R: QuizRepository> GetQuizByCourseUseCase<R> {
    pub async fn execute(&self, course_id: Uuid) -> Result<Quiz, ApiError> {
        self.repo
            .find_by_course(course_id)
            .await?
            .ok_or(ApiError::QuizNotFound)
    }
}

// ── SubmitQuiz ───────────────────────────────────────────────────────────────

pub struct QuizSubmission {
    pub result: QuizResult,
    pub score: QuizScore,
}

pub struct SubmitQuizUseCase<R: QuizRepository> {
    pub repo: R,
}

impl<R: QuizRepository> SubmitQuizUseCase<R> {
    /// `answers[i]` is the chosen option index for the i-th question.
    pub async fn execute(
        &self,
        user_id: Uuid,
        quiz_id: Option<Uuid>,
        answers: Vec<Option<i64>>,
    ) -> Result<QuizSubmission, ApiError> {
        let quiz_id = quiz_id.ok_or(ApiError::MissingData("Quiz ID is required"))?;
        let quiz = self
            .repo
            .find_by_id(quiz_id)
            .await?
            .ok_or(ApiError::QuizNotFound)?;
        let keys: Vec<i32> = quiz.questions.iter().map(|q| q.correct_answer).collect();
        let score = grade(&keys, &answers, quiz.passing_score);
        let result = QuizResult {
            id: Uuid::now_v7(),
            user_id,
            quiz_id,
            score: score.correct as i32,
            total_questions: score.total as i32,
            passed: score.passed,
            submitted_at: Utc::now(),
        };
        self.repo.insert_result(&result).await?;
        Ok(QuizSubmission { result, score })
    }
}

// ── GetUserQuizResults ───────────────────────────────────────────────────────

pub struct GetUserQuizResultsUseCase<R: QuizRepository> {
    pub repo: R,
}

impl<R: QuizRepository> GetUserQuizResultsUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<QuizResultWithQuiz>, ApiError> {
        self.repo.list_results(user_id).await
    }
}

// ── CreateQuiz ───────────────────────────────────────────────────────────────

pub struct CreateQuestionInput {
    pub question: Option<String>,
    pub options: Vec<String>,
    pub correct_answer: Option<AnswerKey>,
}

pub struct CreateQuizInput {
    pub course_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub passing_score: Option<i32>,
    pub attempts_allowed: Option<i32>,
    pub questions: Vec<CreateQuestionInput>,
}

/// Validate one authored question and normalize its answer to an index.
fn normalize_question(position: usize, input: CreateQuestionInput) -> Result<NewQuizQuestion, ApiError> {
    let n = position + 1;
    let question = input
        .question
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::InvalidQuestion(format!("question {n} has no text")))?;
    let key = input
        .correct_answer
        .ok_or_else(|| ApiError::InvalidQuestion(format!("question {n} has no correct answer")))?;
    let correct_answer = key
        .resolve(&input.options)
        .map_err(|e| ApiError::InvalidQuestion(format!("question {n}: {e}")))?;
    Ok(NewQuizQuestion {
        question,
        options: input.options,
        correct_answer,
    })
}

pub struct CreateQuizUseCase<R: QuizRepository, C: CourseRepository> {
    pub repo: R,
    pub courses: C,
}

impl<R: QuizRepository, C: CourseRepository> CreateQuizUseCase<R, C> {
    pub async fn execute(&self, caller: Uuid, input: CreateQuizInput) -> Result<Quiz, ApiError> {
        let course_id = input
            .course_id
            .ok_or(ApiError::MissingData("Course ID is required"))?;
        let title = input
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(ApiError::MissingData("Title is required"))?;
        let passing_score = input.passing_score.unwrap_or(DEFAULT_PASSING_SCORE);
        if !(0..=100).contains(&passing_score) {
            return Err(ApiError::InvalidPassingScore);
        }
        let questions = input
            .questions
            .into_iter()
            .enumerate()
            .map(|(i, q)| normalize_question(i, q))
            .collect::<Result<Vec<_>, _>>()?;

        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or(ApiError::CourseNotFound)?;
        if course.instructor_id != caller {
            return Err(ApiError::Forbidden);
        }

        self.repo
            .create_with_questions(&NewQuiz {
                course_id,
                title,
                description: input.description,
                passing_score,
                attempts_allowed: input.attempts_allowed,
                questions,
            })
            .await
    }
}
