use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use raisedup_core::health::healthz;
use raisedup_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    course::{create_course, delete_course, get_course, list_courses, update_course},
    enrollment::{enroll, enrollment_status, list_enrollments},
    health::readyz,
    lesson::{create_lesson, delete_lesson, get_lesson, list_lessons, update_lesson},
    payment::{create_checkout_session, list_user_payments, verify_payment},
    profile::{ensure_profile, get_profile, list_users, update_profile},
    progress::{get_course_progress, list_user_progress, update_progress},
    quiz::{create_quiz, get_quiz_by_course, list_results, submit_quiz},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Browser front-end is served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth / profiles
        .route("/api/auth/ensure-profile", post(ensure_profile))
        .route("/api/auth/profile", get(get_profile).patch(update_profile))
        .route("/api/auth/users", get(list_users))
        // Courses
        .route("/api/courses", get(list_courses).post(create_course))
        .route(
            "/api/courses/{id}",
            get(get_course).patch(update_course).delete(delete_course),
        )
        // Lessons
        .route("/api/lessons", post(create_lesson))
        .route("/api/lessons/course/{course_id}", get(list_lessons))
        .route(
            "/api/lessons/{id}",
            get(get_lesson).patch(update_lesson).delete(delete_lesson),
        )
        // Quizzes
        .route("/api/quiz", post(create_quiz))
        .route("/api/quiz/course/{course_id}", get(get_quiz_by_course))
        .route("/api/quiz/submit", post(submit_quiz))
        .route("/api/quiz/results", get(list_results))
        // Progress
        .route("/api/progress/user", get(list_user_progress))
        .route("/api/progress/update", post(update_progress))
        .route(
            "/api/progress/{user_id}/{course_id}",
            get(get_course_progress),
        )
        // Payments
        .route("/api/payment/create-checkout", post(create_checkout_session))
        .route("/api/payment/verify", post(verify_payment))
        .route("/api/payment/user", get(list_user_payments))
        // Enrollments
        .route("/api/enrollments", get(list_enrollments).post(enroll))
        .route(
            "/api/enrollments/course/{course_id}",
            get(enrollment_status),
        )
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(propagate_request_id_layer())
                .layer(trace_layer())
                .layer(cors),
        )
        .with_state(state)
}
