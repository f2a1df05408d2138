use super::*;

/// Tests creating a question.
///
/// Expected: Ok with every field stored
#[tokio::test]
async fn creates_question() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::create_guild_config(db).await?;
    let guild_id: u64 = config.guild_id.parse().unwrap();

    let question = TicketQuestionRepository::new(db)
        .create(guild_id, param("What happened?"))
        .await?;

    assert_eq!(question.guild_id, guild_id);
    assert_eq!(question.label, "What happened?");
    assert_eq!(question.max_length, 400);
    assert!(question.required);

    Ok(())
}
