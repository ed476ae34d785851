use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Progress::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Progress::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Progress::UserId).uuid().not_null())
                    .col(ColumnDef::new(Progress::LessonId).uuid().not_null())
                    .col(
                        ColumnDef::new(Progress::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Progress::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Progress::Table, Progress::LessonId)
                            .to(Lessons::Table, Lessons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        // Conflict target of the progress upsert.
        manager
            .create_index(
                Index::create()
                    .table(Progress::Table)
                    .col(Progress::UserId)
                    .col(Progress::LessonId)
                    .name("uq_progress_user_lesson")
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Progress::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Progress {
    Table,
    Id,
    UserId,
    LessonId,
    Completed,
    CompletedAt,
}

#[derive(Iden)]
enum Lessons {
    Table,
    Id,
}
