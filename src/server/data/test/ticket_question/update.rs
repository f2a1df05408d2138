use super::*;

/// Tests editing a question.
///
/// Expected: Ok(Some) with the new values
#[tokio::test]
async fn updates_question() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::create_guild_config(db).await?;
    let question = factory::create_ticket_question(db, &config.guild_id).await?;

    let mut edit = param("Order number?");
    edit.required = false;
    edit.min_length = 0;
    let updated = TicketQuestionRepository::new(db)
        .update(config.guild_id.parse().unwrap(), question.id, edit)
        .await?
        .unwrap();

    assert_eq!(updated.id, question.id);
    assert_eq!(updated.label, "Order number?");
    assert!(!updated.required);

    Ok(())
}

/// Tests editing a question through another guild.
///
/// Expected: Ok(None) and the question is unchanged
#[tokio::test]
async fn ignores_question_of_other_guild() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::create_guild_config(db).await?;
    let other = factory::create_guild_config(db).await?;
    let question = factory::create_ticket_question(db, &config.guild_id).await?;

    let result = TicketQuestionRepository::new(db)
        .update(other.guild_id.parse().unwrap(), question.id, param("Hijack"))
        .await?;

    assert!(result.is_none());

    Ok(())
}
