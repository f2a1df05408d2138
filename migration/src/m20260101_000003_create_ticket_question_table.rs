use sea_orm_migration::{prelude::*, schema::*};

use super::m20260101_000001_create_guild_config_table::GuildConfig;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketQuestion::Table)
                    .if_not_exists()
                    .col(pk_auto(TicketQuestion::Id))
                    .col(string(TicketQuestion::GuildId))
                    .col(string(TicketQuestion::Label))
                    .col(string(TicketQuestion::Placeholder))
                    .col(integer(TicketQuestion::MinLength).default(2))
                    .col(integer(TicketQuestion::MaxLength).default(4000))
                    .col(boolean(TicketQuestion::Required).default(true))
                    .col(string_null(TicketQuestion::DefaultValue))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_question_guild_id")
                            .from(TicketQuestion::Table, TicketQuestion::GuildId)
                            .to(GuildConfig::Table, GuildConfig::GuildId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TicketQuestion::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TicketQuestion {
    Table,
    Id,
    GuildId,
    Label,
    Placeholder,
    MinLength,
    MaxLength,
    Required,
    DefaultValue,
}
