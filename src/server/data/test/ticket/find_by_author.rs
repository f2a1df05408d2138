use super::*;

/// Tests finding a member's open ticket.
///
/// Expected: Ok(Some) in the right guild, Ok(None) elsewhere
#[tokio::test]
async fn finds_ticket_of_author_in_guild() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::create_guild_config(db).await?;
    let other = factory::create_guild_config(db).await?;
    let ticket = factory::ticket::TicketFactory::new(db, &config.guild_id)
        .author_id("100")
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let found = repo
        .find_by_author(config.guild_id.parse().unwrap(), 100)
        .await?
        .unwrap();

    assert_eq!(found.id, ticket.id);
    assert_eq!(found.author_id, 100);
    assert!(repo
        .find_by_author(other.guild_id.parse().unwrap(), 100)
        .await?
        .is_none());

    Ok(())
}
