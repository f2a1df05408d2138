use super::*;

fn param(guild_id: u64, roles: Vec<u64>) -> SetupGuildParam {
    SetupGuildParam {
        guild_id,
        ticket_category: 10,
        log_channel: 11,
        support_roles: roles,
        ping_support_roles: true,
    }
}

/// Tests the first run of the setup wizard.
///
/// Expected: Ok with is_new true, defaults applied and roles stored
#[tokio::test]
async fn creates_new_config() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (config, is_new) = GuildConfigRepository::new(db)
        .setup(param(1, vec![5, 6]))
        .await?;

    assert!(is_new);
    assert_eq!(config.ticket_counter, 1);
    assert_eq!(config.max_tickets, 50);
    assert!(config.support_enabled);
    assert_eq!(config.ticket_category, Some(10));
    assert_eq!(config.log_channel, Some(11));

    let roles = crate::server::data::support_role::SupportRoleRepository::new(db)
        .get_by_guild_id(1)
        .await?;
    assert_eq!(roles, vec![5, 6]);

    Ok(())
}

/// Tests re-running setup on a configured guild.
///
/// Verifies the counter and unrelated settings survive while the wizard's
/// fields and the support role list are replaced.
///
/// Expected: Ok with is_new false and counter preserved
#[tokio::test]
async fn updates_existing_config() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_config::GuildConfigFactory::new(db)
        .guild_id("1")
        .ticket_counter(42)
        .max_tickets(5)
        .ping_support_roles(true)
        .build()
        .await?;
    factory::create_support_role(db, "1", "7").await?;

    let mut update = param(1, vec![8]);
    update.ping_support_roles = false;
    let (config, is_new) = GuildConfigRepository::new(db).setup(update).await?;

    assert!(!is_new);
    assert_eq!(config.ticket_counter, 42);
    assert_eq!(config.max_tickets, 5);
    assert!(!config.ping_support_roles);
    assert_eq!(config.ticket_category, Some(10));

    let roles = crate::server::data::support_role::SupportRoleRepository::new(db)
        .get_by_guild_id(1)
        .await?;
    assert_eq!(roles, vec![8]);

    Ok(())
}
