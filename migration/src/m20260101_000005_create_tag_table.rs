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
                    .table(Tag::Table)
                    .if_not_exists()
                    .col(pk_auto(Tag::Id))
                    .col(string(Tag::GuildId))
                    .col(string(Tag::Name))
                    .col(text(Tag::Content))
                    .col(string(Tag::AuthorId))
                    .col(string(Tag::OwnerId))
                    .col(integer(Tag::Uses).default(0))
                    .col(timestamp_with_time_zone(Tag::CreatedAt))
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_tag_guild_name_unique")
                            .col(Tag::GuildId)
                            .col(Tag::Name),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tag_guild_id")
                            .from(Tag::Table, Tag::GuildId)
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
            .drop_table(Table::drop().table(Tag::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Tag {
    Table,
    Id,
    GuildId,
    Name,
    Content,
    AuthorId,
    OwnerId,
    Uses,
    CreatedAt,
}
