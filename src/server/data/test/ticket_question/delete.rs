use super::*;

/// Tests deleting a question.
///
/// Expected: Ok(true), then the question is gone
#[tokio::test]
async fn deletes_question() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::create_guild_config(db).await?;
    let guild_id: u64 = config.guild_id.parse().unwrap();
    let question = factory::create_ticket_question(db, &config.guild_id).await?;
    let repo = TicketQuestionRepository::new(db);

    assert!(repo.delete(guild_id, question.id).await?);
    assert!(repo.find_by_id(guild_id, question.id).await?.is_none());
    assert!(!repo.delete(guild_id, question.id).await?);

    Ok(())
}
