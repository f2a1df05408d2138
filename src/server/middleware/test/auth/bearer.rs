use super::*;

/// Tests a known API token authenticates its owner without a session.
///
/// Expected: Ok(User) owning the token
#[tokio::test]
async fn resolves_token_owner() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::UserFactory::new(db)
        .discord_id("555")
        .build()
        .await?;
    let token = factory::api_token::create_api_token(db, &user.discord_id).await?;

    let resolved = AuthGuard::new(db, session)
        .require(&bearer_headers(&token.token))
        .await?;

    assert_eq!(resolved.discord_id, 555);

    Ok(())
}

/// Tests an unknown token is rejected even with a logged-in session.
///
/// Expected: Err(AuthError::InvalidApiToken)
#[tokio::test]
async fn unknown_token_wins_over_session() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    factory::user::UserFactory::new(db)
        .discord_id("555")
        .build()
        .await?;
    AuthSession::new(session).set_user_id(555).await?;

    let result = AuthGuard::new(db, session)
        .require(&bearer_headers("not-a-token"))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidApiToken))
    ));

    Ok(())
}

#[test]
fn parses_bearer_header() {
    assert_eq!(bearer_token(&bearer_headers("abc")), Some("abc"));

    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
    assert_eq!(bearer_token(&headers), None);

    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer   xyz "));
    assert_eq!(bearer_token(&headers), Some("xyz"));

    assert_eq!(bearer_token(&HeaderMap::new()), None);
}
