use super::*;

/// Tests listing questions in creation order.
///
/// Expected: Ok with questions of this guild only, oldest first
#[tokio::test]
async fn lists_guild_questions_in_order() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::create_guild_config(db).await?;
    let other = factory::create_guild_config(db).await?;
    factory::ticket_question::TicketQuestionFactory::new(db, &config.guild_id)
        .label("First")
        .build()
        .await?;
    factory::ticket_question::TicketQuestionFactory::new(db, &config.guild_id)
        .label("Second")
        .build()
        .await?;
    factory::create_ticket_question(db, &other.guild_id).await?;

    let repo = TicketQuestionRepository::new(db);
    let questions = repo
        .get_by_guild_id(config.guild_id.parse().unwrap())
        .await?;

    let labels: Vec<_> = questions.iter().map(|q| q.label.as_str()).collect();
    assert_eq!(labels, vec!["First", "Second"]);
    assert_eq!(repo.count(config.guild_id.parse().unwrap()).await?, 2);

    Ok(())
}

/// Tests the modal row cap.
///
/// Expected: Ok with at most five questions returned
#[tokio::test]
async fn caps_at_five_questions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::create_guild_config(db).await?;
    for _ in 0..7 {
        factory::create_ticket_question(db, &config.guild_id).await?;
    }

    let questions = TicketQuestionRepository::new(db)
        .get_by_guild_id(config.guild_id.parse().unwrap())
        .await?;

    assert_eq!(questions.len(), 5);

    Ok(())
}
