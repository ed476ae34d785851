use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Lessons::Table)
                    .col(Lessons::CourseId)
                    .col(Lessons::OrderIndex)
                    .name("idx_lessons_course_id_order_index")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Courses::Table)
                    .col(Courses::InstructorId)
                    .name("idx_courses_instructor_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Quizzes::Table)
                    .col(Quizzes::CourseId)
                    .name("idx_quizzes_course_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(QuizResults::Table)
                    .col(QuizResults::UserId)
                    .name("idx_quiz_results_user_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Payments::Table)
                    .col(Payments::UserId)
                    .name("idx_payments_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_payments_user_id",
            "idx_quiz_results_user_id",
            "idx_quizzes_course_id",
            "idx_courses_instructor_id",
            "idx_lessons_course_id_order_index",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden)]
enum Lessons {
    Table,
    CourseId,
    OrderIndex,
}

#[derive(Iden)]
enum Courses {
    Table,
    InstructorId,
}

#[derive(Iden)]
enum Quizzes {
    Table,
    CourseId,
}

#[derive(Iden)]
enum QuizResults {
    Table,
    UserId,
}

#[derive(Iden)]
enum Payments {
    Table,
    UserId,
}
