//! Create choice table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Choice::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Choice::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Choice::QuestionId).integer().not_null())
                    .col(ColumnDef::new(Choice::ChoiceText).string_len(200).not_null())
                    .col(ColumnDef::new(Choice::Votes).integer().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_choice_question_id")
                    .table(Choice::Table)
                    .col(Choice::QuestionId)
                    .to_owned(),
            )
            .await?;

        // Foreign key: question_id -> question.id
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_choice_question_id")
                    .from(Choice::Table, Choice::QuestionId)
                    .to(Question::Table, Question::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Choice::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Choice {
    Table,
    Id,
    QuestionId,
    ChoiceText,
    Votes,
}

#[derive(Iden)]
enum Question {
    Table,
    Id,
}
