use super::*;

/// Tests applying single-field updates.
///
/// Expected: Ok(Some) with only the targeted field changed
#[tokio::test]
async fn applies_single_field_updates() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_config::GuildConfigFactory::new(db)
        .guild_id("1")
        .build()
        .await?;
    let repo = GuildConfigRepository::new(db);

    let config = repo
        .update(1, GuildConfigUpdate::MaxTickets(10))
        .await?
        .unwrap();
    assert_eq!(config.max_tickets, 10);
    assert!(config.support_enabled);

    let config = repo
        .update(1, GuildConfigUpdate::SupportEnabled(false))
        .await?
        .unwrap();
    assert!(!config.support_enabled);
    assert_eq!(config.max_tickets, 10);

    let config = repo
        .update(1, GuildConfigUpdate::TicketCategory(None))
        .await?
        .unwrap();
    assert_eq!(config.ticket_category, None);

    let config = repo
        .update(1, GuildConfigUpdate::LogChannel(Some(99)))
        .await?
        .unwrap();
    assert_eq!(config.log_channel, Some(99));

    Ok(())
}

/// Tests updating a guild without configuration.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unconfigured_guild() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = GuildConfigRepository::new(db)
        .update(1, GuildConfigUpdate::PingSupportRoles(false))
        .await?;

    assert!(result.is_none());

    Ok(())
}
