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
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(pk_auto(Ticket::Id))
                    .col(string(Ticket::GuildId))
                    .col(big_integer(Ticket::Number))
                    .col(string(Ticket::AuthorId))
                    .col(string_uniq(Ticket::ChannelId))
                    .col(string_null(Ticket::Subject))
                    .col(timestamp_with_time_zone(Ticket::OpenedAt))
                    .col(boolean(Ticket::Locked).default(false))
                    // One open ticket per member per guild
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_ticket_guild_author_unique")
                            .col(Ticket::GuildId)
                            .col(Ticket::AuthorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_guild_id")
                            .from(Ticket::Table, Ticket::GuildId)
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
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Ticket {
    Table,
    Id,
    GuildId,
    Number,
    AuthorId,
    ChannelId,
    Subject,
    OpenedAt,
    Locked,
}
