use super::*;
use crate::server::data::guild_config::GuildConfigRepository;

/// Tests that creating tickets hands out consecutive numbers.
///
/// Expected: Ok with numbers 7 and 8, counter advanced to 9
#[tokio::test]
async fn assigns_consecutive_numbers() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_config::GuildConfigFactory::new(db)
        .guild_id("1")
        .ticket_counter(7)
        .build()
        .await?;
    let repo = TicketRepository::new(db);

    let first = repo
        .create(CreateTicketParam {
            guild_id: 1,
            author_id: 100,
            channel_id: 200,
            subject: Some("Billing".to_string()),
        })
        .await?;
    let second = repo
        .create(CreateTicketParam {
            guild_id: 1,
            author_id: 101,
            channel_id: 201,
            subject: None,
        })
        .await?;

    assert_eq!(first.number, 7);
    assert_eq!(second.number, 8);
    assert_eq!(first.subject.as_deref(), Some("Billing"));
    assert!(!first.locked);

    let config = GuildConfigRepository::new(db)
        .find_by_guild_id(1)
        .await?
        .unwrap();
    assert_eq!(config.ticket_counter, 9);

    Ok(())
}

/// Tests creating a ticket in an unconfigured guild.
///
/// Expected: Err(InternalErr) and no row written
#[tokio::test]
async fn fails_without_config() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let result = repo
        .create(CreateTicketParam {
            guild_id: 1,
            author_id: 100,
            channel_id: 200,
            subject: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));
    assert!(repo.find_by_channel_id(200).await?.is_none());

    Ok(())
}

/// Tests that a failed insert leaves the counter untouched.
///
/// Expected: Err on duplicate channel, counter unchanged
#[tokio::test]
async fn rolls_back_counter_on_failure() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_config::GuildConfigFactory::new(db)
        .guild_id("1")
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db, "1")
        .channel_id("200")
        .build()
        .await?;

    let result = TicketRepository::new(db)
        .create(CreateTicketParam {
            guild_id: 1,
            author_id: 100,
            channel_id: 200,
            subject: None,
        })
        .await;

    assert!(result.is_err());
    let config = GuildConfigRepository::new(db)
        .find_by_guild_id(1)
        .await?
        .unwrap();
    assert_eq!(config.ticket_counter, 1);

    Ok(())
}
