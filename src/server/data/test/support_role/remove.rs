use super::*;

/// Tests removing a support role.
///
/// Expected: Ok(true) then Ok(false) on a second attempt
#[tokio::test]
async fn removes_role_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::helpers::create_guild_config_with_roles(db, &["5", "6"]).await?;
    let guild_id: u64 = config.guild_id.parse().unwrap();
    let repo = SupportRoleRepository::new(db);

    assert!(repo.remove(guild_id, 5).await?);
    assert!(!repo.remove(guild_id, 5).await?);
    assert_eq!(repo.get_by_guild_id(guild_id).await?, vec![6]);

    Ok(())
}
