use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use raisedup_auth_types::bearer::JwtSecret;

use crate::infra::db::{
    DbCourseRepository, DbEnrollmentRepository, DbLessonRepository, DbPaymentRepository,
    DbProfileRepository, DbProgressRepository, DbQuizRepository,
};
use crate::infra::stripe::StripeClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
    /// `None` when no provider key is configured.
    pub stripe: Option<StripeClient>,
    pub client_url: Arc<str>,
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}

impl AppState {
    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: self.db.clone(),
        }
    }

    pub fn course_repo(&self) -> DbCourseRepository {
        DbCourseRepository {
            db: self.db.clone(),
        }
    }

    pub fn lesson_repo(&self) -> DbLessonRepository {
        DbLessonRepository {
            db: self.db.clone(),
        }
    }

    pub fn enrollment_repo(&self) -> DbEnrollmentRepository {
        DbEnrollmentRepository {
            db: self.db.clone(),
        }
    }

    pub fn progress_repo(&self) -> DbProgressRepository {
        DbProgressRepository {
            db: self.db.clone(),
        }
    }

    pub fn quiz_repo(&self) -> DbQuizRepository {
        DbQuizRepository {
            db: self.db.clone(),
        }
    }

    pub fn payment_repo(&self) -> DbPaymentRepository {
        DbPaymentRepository {
            db: self.db.clone(),
        }
    }
}
