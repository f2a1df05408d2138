use super::*;

/// Tests filtering a guild list down to configured guilds.
///
/// Expected: Ok with only the configured IDs
#[tokio::test]
async fn keeps_only_configured_guilds() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_config::GuildConfigFactory::new(db)
        .guild_id("1")
        .build()
        .await?;
    factory::guild_config::GuildConfigFactory::new(db)
        .guild_id("3")
        .build()
        .await?;

    let repo = GuildConfigRepository::new(db);
    let mut configured = repo.filter_configured(&[1, 2, 3]).await?;
    configured.sort();

    assert_eq!(configured, vec![1, 3]);
    assert!(repo.filter_configured(&[]).await?.is_empty());
    assert_eq!(repo.count().await?, 2);

    Ok(())
}
