use uuid::Uuid;

use raisedup_api::error::ApiError;
use raisedup_api::usecase::quiz::{
    CreateQuestionInput, CreateQuizInput, CreateQuizUseCase, DEFAULT_PASSING_SCORE,
    GetQuizByCourseUseCase, GetUserQuizResultsUseCase, SubmitQuizUseCase,
};
use raisedup_domain::quiz::AnswerKey;

use crate::helpers::{MockCourseRepo, MockQuizRepo, test_course, test_quiz};

fn question(text: &str, key: AnswerKey) -> CreateQuestionInput {
    CreateQuestionInput {
        question: Some(text.to_owned()),
        options: vec!["color".into(), "font-size".into(), "margin".into()],
        correct_answer: Some(key),
    }
}

fn quiz_input(course_id: Uuid, questions: Vec<CreateQuestionInput>) -> CreateQuizInput {
    CreateQuizInput {
        course_id: Some(course_id),
        title: Some("CSS basics".to_owned()),
        description: None,
        passing_score: None,
        attempts_allowed: Some(3),
        questions,
    }
}

// ── GetQuizByCourseUseCase ───────────────────────────────────────────────────

#[tokio::test]
async fn should_return_earliest_quiz_of_course() {
    let course_id = Uuid::new_v4();
    let mut first = test_quiz(course_id, &[0], 70);
    first.created_at -= chrono::Duration::minutes(5);
    let second = test_quiz(course_id, &[1], 70);
    let usecase = GetQuizByCourseUseCase {
        repo: MockQuizRepo::new(vec![second, first.clone()]),
    };

    assert_eq!(usecase.execute(course_id).await.unwrap().id, first.id);
}

#[tokio::test]
async fn should_report_course_without_quiz() {
    let usecase = GetQuizByCourseUseCase {
        repo: MockQuizRepo::default(),
    };
    assert!(matches!(
        usecase.execute(Uuid::new_v4()).await,
        Err(ApiError::QuizNotFound)
    ));
}

// ── SubmitQuizUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_grade_and_store_passing_submission() {
    let quiz = test_quiz(Uuid::new_v4(), &[0, 1, 2, 3], 70);
    let repo = MockQuizRepo::new(vec![quiz.clone()]);
    let usecase = SubmitQuizUseCase { repo: repo.clone() };
    let user_id = Uuid::new_v4();

    let submission = usecase
        .execute(user_id, Some(quiz.id), vec![Some(0), Some(1), Some(2), Some(0)])
        .await
        .unwrap();

    assert_eq!(submission.score.correct, 3);
    assert_eq!(submission.score.percentage, 75);
    assert!(submission.result.passed);
    assert_eq!(submission.result.score, 3);
    assert_eq!(submission.result.total_questions, 4);
    assert_eq!(repo.results.lock().unwrap()[0], submission.result);
}

#[tokio::test]
async fn should_count_missing_answers_as_wrong() {
    let quiz = test_quiz(Uuid::new_v4(), &[0, 1, 2], 50);
    let usecase = SubmitQuizUseCase {
        repo: MockQuizRepo::new(vec![quiz.clone()]),
    };

    let submission = usecase
        .execute(Uuid::new_v4(), Some(quiz.id), vec![Some(0), None])
        .await
        .unwrap();

    assert_eq!(submission.score.correct, 1);
    assert_eq!(submission.score.percentage, 33);
    assert!(!submission.result.passed);
}

#[tokio::test]
async fn should_score_empty_quiz_as_zero() {
    let quiz = test_quiz(Uuid::new_v4(), &[], 0);
    let usecase = SubmitQuizUseCase {
        repo: MockQuizRepo::new(vec![quiz.clone()]),
    };
    let submission = usecase
        .execute(Uuid::new_v4(), Some(quiz.id), vec![])
        .await
        .unwrap();
    assert_eq!(submission.score.percentage, 0);
    assert_eq!(submission.result.total_questions, 0);
}

#[tokio::test]
async fn should_reject_submission_without_quiz() {
    let usecase = SubmitQuizUseCase {
        repo: MockQuizRepo::default(),
    };
    assert!(matches!(
        usecase.execute(Uuid::new_v4(), None, vec![]).await,
        Err(ApiError::MissingData(_))
    ));
    assert!(matches!(
        usecase
            .execute(Uuid::new_v4(), Some(Uuid::new_v4()), vec![])
            .await,
        Err(ApiError::QuizNotFound)
    ));
}

// ── GetUserQuizResultsUseCase ────────────────────────────────────────────────

#[tokio::test]
async fn should_list_only_callers_results() {
    let quiz = test_quiz(Uuid::new_v4(), &[0], 70);
    let repo = MockQuizRepo::new(vec![quiz.clone()]);
    let submit = SubmitQuizUseCase { repo: repo.clone() };
    let me = Uuid::new_v4();
    submit.execute(me, Some(quiz.id), vec![Some(0)]).await.unwrap();
    submit
        .execute(Uuid::new_v4(), Some(quiz.id), vec![Some(1)])
        .await
        .unwrap();

    let results = GetUserQuizResultsUseCase { repo }.execute(me).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].quiz_title, quiz.title);
    assert!(results[0].result.passed);
}

// ── CreateQuizUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_quiz_with_normalized_answers() {
    let instructor = Uuid::new_v4();
    let course = test_course(instructor, 0.0);
    let usecase = CreateQuizUseCase {
        repo: MockQuizRepo::default(),
        courses: MockCourseRepo::new(vec![course.clone()]),
    };

    let quiz = usecase
        .execute(
            instructor,
            quiz_input(
                course.id,
                vec![
                    question("Which property sizes text?", AnswerKey::Text("font-size".into())),
                    question("Which adds outer space?", AnswerKey::Index(2)),
                ],
            ),
        )
        .await
        .unwrap();

    assert_eq!(quiz.passing_score, DEFAULT_PASSING_SCORE);
    assert_eq!(quiz.questions.len(), 2);
    assert_eq!(quiz.questions[0].correct_answer, 1);
    assert_eq!(quiz.questions[1].correct_answer, 2);
    assert_eq!(quiz.questions[1].order_index, 1);
}

#[tokio::test]
async fn should_reject_unresolvable_answer() {
    let instructor = Uuid::new_v4();
    let course = test_course(instructor, 0.0);
    let repo = MockQuizRepo::default();
    let usecase = CreateQuizUseCase {
        repo: repo.clone(),
        courses: MockCourseRepo::new(vec![course.clone()]),
    };

    let result = usecase
        .execute(
            instructor,
            quiz_input(
                course.id,
                vec![question("Pick one", AnswerKey::Text("padding".into()))],
            ),
        )
        .await;
    assert!(matches!(result, Err(ApiError::InvalidQuestion(_))));
    assert!(repo.quizzes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_out_of_range_passing_score() {
    let instructor = Uuid::new_v4();
    let course = test_course(instructor, 0.0);
    let usecase = CreateQuizUseCase {
        repo: MockQuizRepo::default(),
        courses: MockCourseRepo::new(vec![course.clone()]),
    };
    let mut input = quiz_input(course.id, vec![]);
    input.passing_score = Some(101);

    assert!(matches!(
        usecase.execute(instructor, input).await,
        Err(ApiError::InvalidPassingScore)
    ));
}

#[tokio::test]
async fn should_forbid_quiz_on_foreign_course() {
    let course = test_course(Uuid::new_v4(), 0.0);
    let usecase = CreateQuizUseCase {
        repo: MockQuizRepo::default(),
        courses: MockCourseRepo::new(vec![course.clone()]),
    };
    let result = usecase
        .execute(Uuid::new_v4(), quiz_input(course.id, vec![]))
        .await;
    assert!(matches!(result, Err(ApiError::Forbidden)));
}
