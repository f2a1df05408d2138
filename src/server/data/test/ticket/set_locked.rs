use super::*;

/// Tests toggling the lock flag.
///
/// Expected: Ok(Some) reflecting each state
#[tokio::test]
async fn toggles_lock() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, ticket) = factory::helpers::create_ticket_with_config(db).await?;
    let repo = TicketRepository::new(db);

    let locked = repo.set_locked(ticket.id, true).await?.unwrap();
    assert!(locked.locked);
    assert!(locked.channel_name().starts_with("🔒-ticket-"));

    let unlocked = repo.set_locked(ticket.id, false).await?.unwrap();
    assert!(!unlocked.locked);

    Ok(())
}

/// Tests locking a ticket that was already closed.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(TicketRepository::new(db).set_locked(1, true).await?.is_none());

    Ok(())
}
