use super::*;

/// Tests a refresh that omits the refresh token.
///
/// Expected: Ok(Some) with the new access token and the old refresh token
#[tokio::test]
async fn keeps_refresh_token_when_missing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_account_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .discord_id("42")
        .refresh_token(Some("keep-me"))
        .build()
        .await?;

    let user = UserRepository::new(db)
        .update_tokens(
            42,
            TokenPair {
                access_token: "fresh".to_string(),
                refresh_token: None,
                expires_at: Some(Utc::now() + Duration::days(7)),
            },
        )
        .await?
        .unwrap();

    assert_eq!(user.access_token, "fresh");
    assert_eq!(user.refresh_token.as_deref(), Some("keep-me"));

    Ok(())
}

/// Tests refreshing tokens of an unknown user.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_account_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserRepository::new(db)
        .update_tokens(
            42,
            TokenPair {
                access_token: "fresh".to_string(),
                refresh_token: None,
                expires_at: None,
            },
        )
        .await?;

    assert!(result.is_none());

    Ok(())
}
