use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use raisedup_auth_types::bearer::AuthUser;
use raisedup_domain::quiz::AnswerKey;

use crate::domain::types::{Quiz, QuizQuestion, QuizResult, QuizResultWithQuiz};
use crate::error::ApiError;
use crate::handlers::extract::{ApiJson, ApiPath};
use crate::state::AppState;
use crate::usecase::quiz::{
    CreateQuestionInput, CreateQuizInput, CreateQuizUseCase, GetQuizByCourseUseCase,
    GetUserQuizResultsUseCase, SubmitQuizUseCase,
};

#[derive(Serialize)]
pub struct QuizQuestionResponse {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: i32,
    pub order_index: i32,
}

impl From<QuizQuestion> for QuizQuestionResponse {
    fn from(q: QuizQuestion) -> Self {
        Self {
            id: q.id,
            quiz_id: q.quiz_id,
            question: q.question,
            options: q.options,
            correct_answer: q.correct_answer,
            order_index: q.order_index,
        }
    }
}

#[derive(Serialize)]
pub struct QuizResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub passing_score: i32,
    pub attempts_allowed: Option<i32>,
    #[serde(serialize_with = "raisedup_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    pub quiz_questions: Vec<QuizQuestionResponse>,
}

impl From<Quiz> for QuizResponse {
    fn from(q: Quiz) -> Self {
        Self {
            id: q.id,
            course_id: q.course_id,
            title: q.title,
            description: q.description,
            passing_score: q.passing_score,
            attempts_allowed: q.attempts_allowed,
            created_at: q.created_at,
            quiz_questions: q.questions.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct QuizResultResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quiz_id: Uuid,
    pub score: i32,
    pub total_questions: i32,
    pub passed: bool,
    #[serde(serialize_with = "raisedup_core::serde::to_rfc3339_ms")]
    pub submitted_at: DateTime<Utc>,
}

impl From<QuizResult> for QuizResultResponse {
    fn from(r: QuizResult) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            quiz_id: r.quiz_id,
            score: r.score,
            total_questions: r.total_questions,
            passed: r.passed,
            submitted_at: r.submitted_at,
        }
    }
}

// ── GET /api/quiz/course/{courseId} ──────────────────────────────────────────

pub async fn get_quiz_by_course(
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<Uuid>,
) -> Result<Json<QuizResponse>, ApiError> {
    let usecase = GetQuizByCourseUseCase {
        repo: state.quiz_repo(),
    };
    Ok(Json(usecase.execute(course_id).await?.into()))
}

// ── POST /api/quiz/submit ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SubmitQuizRequest {
    pub quiz_id: Option<Uuid>,
    #[serde(default)]
    pub answers: Vec<Option<i64>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizResponse {
    #[serde(flatten)]
    pub result: QuizResultResponse,
    pub score_percentage: u32,
    pub correct_answers: u32,
}

pub async fn submit_quiz(
    user: AuthUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SubmitQuizRequest>,
) -> Result<Json<SubmitQuizResponse>, ApiError> {
    let usecase = SubmitQuizUseCase {
        repo: state.quiz_repo(),
    };
    let submission = usecase
        .execute(user.user_id, body.quiz_id, body.answers)
        .await?;
    Ok(Json(SubmitQuizResponse {
        result: submission.result.into(),
        score_percentage: submission.score.percentage,
        correct_answers: submission.score.correct,
    }))
}

// ── GET /api/quiz/results ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CourseTitle {
    pub title: String,
}

#[derive(Serialize)]
pub struct ResultQuiz {
    pub title: String,
    pub course_id: Uuid,
    pub courses: CourseTitle,
}

#[derive(Serialize)]
pub struct QuizResultWithQuizResponse {
    #[serde(flatten)]
    pub result: QuizResultResponse,
    pub quizzes: ResultQuiz,
}

impl From<QuizResultWithQuiz> for QuizResultWithQuizResponse {
    fn from(r: QuizResultWithQuiz) -> Self {
        Self {
            result: r.result.into(),
            quizzes: ResultQuiz {
                title: r.quiz_title,
                course_id: r.course_id,
                courses: CourseTitle {
                    title: r.course_title,
                },
            },
        }
    }
}

pub async fn list_results(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<QuizResultWithQuizResponse>>, ApiError> {
    let usecase = GetUserQuizResultsUseCase {
        repo: state.quiz_repo(),
    };
    let results = usecase.execute(user.user_id).await?;
    Ok(Json(results.into_iter().map(Into::into).collect()))
}

// ── POST /api/quiz ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateQuestionRequest {
    pub question: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: Option<AnswerKey>,
}

#[derive(Deserialize)]
pub struct CreateQuizRequest {
    pub course_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub passing_score: Option<i32>,
    pub attempts_allowed: Option<i32>,
    #[serde(default)]
    pub questions: Vec<CreateQuestionRequest>,
}

pub async fn create_quiz(
    user: AuthUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateQuizRequest>,
) -> Result<(StatusCode, Json<QuizResponse>), ApiError> {
    let usecase = CreateQuizUseCase {
        repo: state.quiz_repo(),
        courses: state.course_repo(),
    };
    let quiz = usecase
        .execute(
            user.user_id,
            CreateQuizInput {
                course_id: body.course_id,
                title: body.title,
                description: body.description,
                passing_score: body.passing_score,
                attempts_allowed: body.attempts_allowed,
                questions: body
                    .questions
                    .into_iter()
                    .map(|q| CreateQuestionInput {
                        question: q.question,
                        options: q.options,
                        correct_answer: q.correct_answer,
                    })
                    .collect(),
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(quiz.into())))
}
