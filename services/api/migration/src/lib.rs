use sea_orm_migration::prelude::*;

mod m20250601_000001_create_profiles;
mod m20250601_000002_create_courses;
mod m20250601_000003_create_lessons;
mod m20250601_000004_create_enrollments;
mod m20250601_000005_create_progress;
mod m20250601_000006_create_quizzes;
mod m20250601_000007_create_quiz_questions;
mod m20250601_000008_create_quiz_results;
mod m20250601_000009_create_payments;
mod m20250601_000010_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_profiles::Migration),
            Box::new(m20250601_000002_create_courses::Migration),
            Box::new(m20250601_000003_create_lessons::Migration),
            Box::new(m20250601_000004_create_enrollments::Migration),
            Box::new(m20250601_000005_create_progress::Migration),
            Box::new(m20250601_000006_create_quizzes::Migration),
            Box::new(m20250601_000007_create_quiz_questions::Migration),
            Box::new(m20250601_000008_create_quiz_results::Migration),
            Box::new(m20250601_000009_create_payments::Migration),
            Box::new(m20250601_000010_add_lookup_indexes::Migration),
        ]
    }
}
