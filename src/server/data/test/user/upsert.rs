use super::*;

/// Tests the first login of a user.
///
/// Expected: Ok with the user and tokens stored
#[tokio::test]
async fn inserts_new_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_account_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .upsert(UpsertUserParam {
            discord_id: 42,
            name: "alice".to_string(),
            tokens: TokenPair {
                access_token: "access".to_string(),
                refresh_token: Some("refresh".to_string()),
                expires_at: Some(Utc::now() + Duration::days(7)),
            },
        })
        .await?;

    assert_eq!(user.discord_id, 42);
    assert_eq!(user.name, "alice");
    assert_eq!(user.refresh_token.as_deref(), Some("refresh"));
    assert!(repo.find_by_discord_id(42).await?.is_some());

    Ok(())
}

/// Tests a repeat login.
///
/// Expected: Ok with the name and tokens replaced, no duplicate row
#[tokio::test]
async fn updates_existing_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_account_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .discord_id("42")
        .name("old name")
        .build()
        .await?;

    let user = UserRepository::new(db)
        .upsert(UpsertUserParam {
            discord_id: 42,
            name: "new name".to_string(),
            tokens: TokenPair {
                access_token: "second".to_string(),
                refresh_token: Some("second-refresh".to_string()),
                expires_at: None,
            },
        })
        .await?;

    assert_eq!(user.name, "new name");
    assert_eq!(user.access_token, "second");

    Ok(())
}
