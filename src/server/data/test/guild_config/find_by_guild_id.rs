use super::*;

/// Tests finding an existing configuration.
///
/// Expected: Ok(Some) with snowflakes parsed to u64
#[tokio::test]
async fn finds_existing_config() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::guild_config::GuildConfigFactory::new(db)
        .guild_id("100")
        .ticket_category(Some("200"))
        .log_channel(None)
        .build()
        .await?;

    let found = GuildConfigRepository::new(db)
        .find_by_guild_id(100)
        .await?
        .unwrap();

    assert_eq!(found.id, config.id);
    assert_eq!(found.guild_id, 100);
    assert_eq!(found.ticket_category, Some(200));
    assert_eq!(found.log_channel, None);

    Ok(())
}

/// Tests looking up a guild that never ran setup.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unconfigured_guild() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let found = GuildConfigRepository::new(db).find_by_guild_id(404).await?;

    assert!(found.is_none());

    Ok(())
}
