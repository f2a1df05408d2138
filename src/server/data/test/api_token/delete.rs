use super::*;

/// Tests revoking a token.
///
/// Expected: Ok(true) for the owner, Ok(false) for anyone else
#[tokio::test]
async fn revokes_only_own_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_account_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let token = factory::create_api_token(db, &user.discord_id).await?;
    let repo = ApiTokenRepository::new(db);

    assert!(!repo
        .delete(other.discord_id.parse().unwrap(), token.id)
        .await?);
    assert!(repo.delete(user.discord_id.parse().unwrap(), token.id).await?);
    assert!(repo.find_by_token(&token.token).await?.is_none());

    Ok(())
}
