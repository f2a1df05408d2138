use super::*;
use sea_orm::{EntityTrait, PaginatorTrait};

/// Tests resetting a guild.
///
/// Verifies every row owned by the guild is removed and other guilds are untouched.
///
/// Expected: Ok(true) and no rows left for the guild
#[tokio::test]
async fn deletes_config_and_children() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::create_guild_config(db).await?;
    factory::create_support_role(db, &config.guild_id, "5").await?;
    factory::create_ticket_question(db, &config.guild_id).await?;
    factory::create_ticket(db, &config.guild_id).await?;
    factory::create_tag(db, &config.guild_id).await?;

    let other = factory::create_guild_config(db).await?;
    factory::create_tag(db, &other.guild_id).await?;

    let deleted = GuildConfigRepository::new(db)
        .delete(config.guild_id.parse().unwrap())
        .await?;

    assert!(deleted);
    assert_eq!(entity::prelude::GuildConfig::find().count(db).await?, 1);
    assert_eq!(entity::prelude::SupportRole::find().count(db).await?, 0);
    assert_eq!(entity::prelude::TicketQuestion::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Ticket::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Tag::find().count(db).await?, 1);

    Ok(())
}

/// Tests resetting a guild that was never configured.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_when_missing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(!GuildConfigRepository::new(db).delete(1).await?);

    Ok(())
}
