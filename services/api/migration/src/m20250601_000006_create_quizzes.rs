use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Quizzes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Quizzes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Quizzes::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Quizzes::Title).text().not_null())
                    .col(ColumnDef::new(Quizzes::Description).text().null())
                    .col(
                        ColumnDef::new(Quizzes::PassingScore)
                            .integer()
                            .not_null()
                            .default(70),
                    )
                    .col(ColumnDef::new(Quizzes::AttemptsAllowed).integer().null())
                    .col(
                        ColumnDef::new(Quizzes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Quizzes::Table, Quizzes::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Quizzes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Quizzes {
    Table,
    Id,
    CourseId,
    Title,
    Description,
    PassingScore,
    AttemptsAllowed,
    CreatedAt,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
}
