use uuid::Uuid;

use raisedup_api::domain::types::EnrollOutcome;
use raisedup_api::error::ApiError;
use raisedup_api::usecase::enrollment::{EnrollUseCase, IsEnrolledUseCase, ListEnrollmentsUseCase};

use crate::helpers::{MockCourseRepo, MockEnrollmentRepo, test_course};

#[tokio::test]
async fn should_enroll_once_and_report_duplicates() {
    let course = test_course(Uuid::new_v4(), 0.0);
    let enrollments = MockEnrollmentRepo::new(vec![course.clone()]);
    let usecase = EnrollUseCase {
        repo: enrollments.clone(),
        courses: MockCourseRepo::new(vec![course.clone()]),
    };
    let user = Uuid::new_v4();

    let first = usecase.execute(user, Some(course.id)).await.unwrap();
    assert!(matches!(first, EnrollOutcome::Created(ref e) if e.course_id == course.id));

    let second = usecase.execute(user, Some(course.id)).await.unwrap();
    assert_eq!(second, EnrollOutcome::AlreadyEnrolled);
    assert_eq!(enrollments.enrollments.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_enrollment_in_missing_course() {
    let usecase = EnrollUseCase {
        repo: MockEnrollmentRepo::default(),
        courses: MockCourseRepo::default(),
    };
    assert!(matches!(
        usecase.execute(Uuid::new_v4(), Some(Uuid::new_v4())).await,
        Err(ApiError::CourseNotFound)
    ));
    assert!(matches!(
        usecase.execute(Uuid::new_v4(), None).await,
        Err(ApiError::MissingData(_))
    ));
}

#[tokio::test]
async fn should_list_enrollments_with_course_and_check_status() {
    let course = test_course(Uuid::new_v4(), 19.0);
    let enrollments = MockEnrollmentRepo::new(vec![course.clone()]);
    let user = Uuid::new_v4();
    EnrollUseCase {
        repo: enrollments.clone(),
        courses: MockCourseRepo::new(vec![course.clone()]),
    }
    .execute(user, Some(course.id))
    .await
    .unwrap();

    let listed = ListEnrollmentsUseCase {
        repo: enrollments.clone(),
    }
    .execute(user)
    .await
    .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].course, course);

    let status = IsEnrolledUseCase { repo: enrollments };
    assert!(status.execute(user, course.id).await.unwrap());
    assert!(!status.execute(Uuid::new_v4(), course.id).await.unwrap());
}
