pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_guild_config_table;
mod m20260101_000002_create_support_role_table;
mod m20260101_000003_create_ticket_question_table;
mod m20260101_000004_create_ticket_table;
mod m20260101_000005_create_tag_table;
mod m20260101_000006_create_user_table;
mod m20260101_000007_create_api_token_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_guild_config_table::Migration),
            Box::new(m20260101_000002_create_support_role_table::Migration),
            Box::new(m20260101_000003_create_ticket_question_table::Migration),
            Box::new(m20260101_000004_create_ticket_table::Migration),
            Box::new(m20260101_000005_create_tag_table::Migration),
            Box::new(m20260101_000006_create_user_table::Migration),
            Box::new(m20260101_000007_create_api_token_table::Migration),
        ]
    }
}
