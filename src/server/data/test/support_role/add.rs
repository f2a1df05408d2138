use super::*;

/// Tests adding a new support role.
///
/// Expected: Ok(true) and the role is listed
#[tokio::test]
async fn adds_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::create_guild_config(db).await?;
    let guild_id: u64 = config.guild_id.parse().unwrap();
    let repo = SupportRoleRepository::new(db);

    assert!(repo.add(guild_id, 5).await?);
    assert_eq!(repo.get_by_guild_id(guild_id).await?, vec![5]);
    assert_eq!(repo.count(guild_id).await?, 1);

    Ok(())
}

/// Tests adding a role that is already a support role.
///
/// Expected: Ok(false) and no duplicate row
#[tokio::test]
async fn rejects_duplicate_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::helpers::create_guild_config_with_roles(db, &["5"]).await?;
    let guild_id: u64 = config.guild_id.parse().unwrap();
    let repo = SupportRoleRepository::new(db);

    assert!(!repo.add(guild_id, 5).await?);
    assert_eq!(repo.count(guild_id).await?, 1);

    Ok(())
}
