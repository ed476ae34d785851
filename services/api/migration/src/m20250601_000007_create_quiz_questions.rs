use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(QuizQuestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuizQuestions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuizQuestions::QuizId).uuid().not_null())
                    .col(ColumnDef::new(QuizQuestions::Question).text().not_null())
                    .col(ColumnDef::new(QuizQuestions::Options).json_binary().not_null())
                    .col(
                        ColumnDef::new(QuizQuestions::CorrectAnswer)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuizQuestions::OrderIndex)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(QuizQuestions::Table, QuizQuestions::QuizId)
                            .to(Quizzes::Table, Quizzes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QuizQuestions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum QuizQuestions {
    Table,
    Id,
    QuizId,
    Question,
    Options,
    CorrectAnswer,
    OrderIndex,
}

#[derive(Iden)]
enum Quizzes {
    Table,
    Id,
}
