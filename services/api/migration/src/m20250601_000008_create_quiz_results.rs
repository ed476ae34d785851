use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(QuizResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuizResults::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuizResults::UserId).uuid().not_null())
                    .col(ColumnDef::new(QuizResults::QuizId).uuid().not_null())
                    .col(ColumnDef::new(QuizResults::Score).integer().not_null())
                    .col(
                        ColumnDef::new(QuizResults::TotalQuestions)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(QuizResults::Passed).boolean().not_null())
                    .col(
                        ColumnDef::new(QuizResults::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(QuizResults::Table, QuizResults::QuizId)
                            .to(Quizzes::Table, Quizzes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QuizResults::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum QuizResults {
    Table,
    Id,
    UserId,
    QuizId,
    Score,
    TotalQuestions,
    Passed,
    SubmittedAt,
}

#[derive(Iden)]
enum Quizzes {
    Table,
    Id,
}
