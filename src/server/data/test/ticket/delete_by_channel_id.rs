use super::*;

/// Tests dropping a ticket when its channel disappears.
///
/// Expected: Ok(true) once, then Ok(false)
#[tokio::test]
async fn deletes_ticket_for_channel() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::create_guild_config(db).await?;
    factory::ticket::TicketFactory::new(db, &config.guild_id)
        .channel_id("300")
        .build()
        .await?;
    let repo = TicketRepository::new(db);

    assert!(repo.delete_by_channel_id(300).await?);
    assert!(!repo.delete_by_channel_id(300).await?);
    assert!(repo.get_all().await?.is_empty());

    Ok(())
}

/// Tests deleting by ID.
///
/// Expected: Ok(true) and the other ticket remains
#[tokio::test]
async fn deletes_by_id() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::create_guild_config(db).await?;
    let first = factory::create_ticket(db, &config.guild_id).await?;
    let second = factory::ticket::TicketFactory::new(db, &config.guild_id)
        .number(2)
        .build()
        .await?;
    let repo = TicketRepository::new(db);

    assert!(repo.delete(first.id).await?);

    let remaining = repo
        .get_by_guild_id(config.guild_id.parse().unwrap())
        .await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second.id);

    Ok(())
}
