use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuildConfig::Table)
                    .if_not_exists()
                    .col(pk_auto(GuildConfig::Id))
                    .col(string_uniq(GuildConfig::GuildId))
                    .col(big_integer(GuildConfig::TicketCounter).default(1))
                    .col(string_null(GuildConfig::TicketCategory))
                    .col(string_null(GuildConfig::LogChannel))
                    .col(boolean(GuildConfig::PingSupportRoles).default(true))
                    .col(integer(GuildConfig::MaxTickets).default(50))
                    .col(boolean(GuildConfig::SupportEnabled).default(true))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuildConfig::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GuildConfig {
    Table,
    Id,
    GuildId,
    TicketCounter,
    TicketCategory,
    LogChannel,
    PingSupportRoles,
    MaxTickets,
    SupportEnabled,
}
