use uuid::Uuid;

use raisedup_api::error::ApiError;
use raisedup_api::usecase::progress::{
    GetAllUserProgressUseCase, GetCourseProgressUseCase, UpdateProgressUseCase,
};

use crate::helpers::{MockLessonRepo, MockProgressRepo, test_course, test_lesson};

// ── UpdateProgressUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_upsert_single_row_per_lesson() {
    let repo = MockProgressRepo::default();
    let usecase = UpdateProgressUseCase { repo: repo.clone() };
    let (user, lesson) = (Uuid::new_v4(), Uuid::new_v4());

    let first = usecase.execute(user, Some(lesson), Some(true)).await.unwrap();
    assert!(first.completed);
    assert!(first.completed_at.is_some());

    let second = usecase.execute(user, Some(lesson), Some(false)).await.unwrap();
    assert_eq!(second.id, first.id);
    assert!(!second.completed);
    assert!(second.completed_at.is_none());
    assert_eq!(repo.rows.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_default_completed_to_false() {
    let usecase = UpdateProgressUseCase {
        repo: MockProgressRepo::default(),
    };
    let row = usecase
        .execute(Uuid::new_v4(), Some(Uuid::new_v4()), None)
        .await
        .unwrap();
    assert!(!row.completed);
}

#[tokio::test]
async fn should_require_lesson_id() {
    let usecase = UpdateProgressUseCase {
        repo: MockProgressRepo::default(),
    };
    assert!(matches!(
        usecase.execute(Uuid::new_v4(), None, Some(true)).await,
        Err(ApiError::MissingData("Lesson ID is required"))
    ));
}

// ── GetCourseProgressUseCase ─────────────────────────────────────────────────

#[tokio::test]
async fn should_summarize_course_progress() {
    let course_id = Uuid::new_v4();
    let lessons: Vec<_> = (0..3).map(|i| test_lesson(course_id, i)).collect();
    let foreign = test_lesson(Uuid::new_v4(), 0);
    let progress = MockProgressRepo::default();
    let user = Uuid::new_v4();

    let update = UpdateProgressUseCase {
        repo: progress.clone(),
    };
    update.execute(user, Some(lessons[0].id), Some(true)).await.unwrap();
    update.execute(user, Some(lessons[1].id), Some(false)).await.unwrap();
    update.execute(user, Some(foreign.id), Some(true)).await.unwrap();

    let mut all = lessons.clone();
    all.push(foreign);
    let usecase = GetCourseProgressUseCase {
        repo: progress,
        lessons: MockLessonRepo::new(all),
    };
    let result = usecase.execute(user, course_id).await.unwrap();

    assert_eq!(result.summary.total_lessons, 3);
    assert_eq!(result.summary.completed_lessons, 1);
    assert_eq!(result.summary.progress_percentage, 33);
    assert_eq!(result.rows.len(), 2);
}

#[tokio::test]
async fn should_report_zero_for_course_without_lessons() {
    let usecase = GetCourseProgressUseCase {
        repo: MockProgressRepo::default(),
        lessons: MockLessonRepo::default(),
    };
    let result = usecase
        .execute(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap();
    assert_eq!(result.summary.total_lessons, 0);
    assert_eq!(result.summary.progress_percentage, 0);
    assert!(result.rows.is_empty());
}

// ── GetAllUserProgressUseCase ────────────────────────────────────────────────

#[tokio::test]
async fn should_join_progress_with_lesson_and_course() {
    let course = test_course(Uuid::new_v4(), 0.0);
    let lesson = test_lesson(course.id, 1);
    let repo = MockProgressRepo {
        lessons: vec![lesson.clone()],
        courses: vec![course.clone()],
        ..MockProgressRepo::default()
    };
    let user = Uuid::new_v4();
    UpdateProgressUseCase { repo: repo.clone() }
        .execute(user, Some(lesson.id), Some(true))
        .await
        .unwrap();

    let rows = GetAllUserProgressUseCase { repo }.execute(user).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].lesson_title, lesson.title);
    assert_eq!(rows[0].course_id, course.id);
    assert_eq!(rows[0].course_title, course.title);
}
