use super::*;

/// Tests storing and looking up a token.
///
/// Expected: Ok with the token found by its secret
#[tokio::test]
async fn creates_and_finds_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_account_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let user_id: u64 = user.discord_id.parse().unwrap();
    let repo = ApiTokenRepository::new(db);

    let token = repo.create(user_id, "a".repeat(64)).await?;
    let found = repo.find_by_token(&"a".repeat(64)).await?.unwrap();

    assert_eq!(found.id, token.id);
    assert_eq!(found.user_discord_id, user_id);
    assert!(repo.find_by_token("missing").await?.is_none());

    Ok(())
}

/// Tests listing a user's tokens.
///
/// Expected: Ok with only that user's tokens, newest first
#[tokio::test]
async fn lists_tokens_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new().with_account_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let first = factory::create_api_token(db, &user.discord_id).await?;
    let second = factory::create_api_token(db, &user.discord_id).await?;
    factory::create_api_token(db, &other.discord_id).await?;

    let tokens = ApiTokenRepository::new(db)
        .get_by_user(user.discord_id.parse().unwrap())
        .await?;

    let ids: Vec<_> = tokens.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    Ok(())
}
