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
                    .table(SupportRole::Table)
                    .if_not_exists()
                    .col(pk_auto(SupportRole::Id))
                    .col(string(SupportRole::GuildId))
                    .col(string(SupportRole::RoleId))
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_support_role_guild_role_unique")
                            .col(SupportRole::GuildId)
                            .col(SupportRole::RoleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_support_role_guild_id")
                            .from(SupportRole::Table, SupportRole::GuildId)
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
            .drop_table(Table::drop().table(SupportRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SupportRole {
    Table,
    Id,
    GuildId,
    RoleId,
}
