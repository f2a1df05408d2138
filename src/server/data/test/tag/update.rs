use super::*;

/// Tests counting tag uses.
///
/// Expected: Ok and the counter goes up by one per call
#[tokio::test]
async fn increments_uses() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::create_guild_config(db).await?;
    let tag = factory::tag::TagFactory::new(db, &config.guild_id)
        .uses(3)
        .build()
        .await?;
    let repo = TagRepository::new(db);

    repo.increment_uses(tag.id).await?;
    repo.increment_uses(tag.id).await?;

    let tag = repo
        .find_by_id(config.guild_id.parse().unwrap(), tag.id)
        .await?
        .unwrap();
    assert_eq!(tag.uses, 5);

    Ok(())
}

/// Tests editing and transferring a tag.
///
/// Expected: Ok(Some) with new content and owner, author unchanged
#[tokio::test]
async fn edits_and_transfers() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::create_guild_config(db).await?;
    let tag = factory::tag::TagFactory::new(db, &config.guild_id)
        .name("old")
        .owner_id("5")
        .build()
        .await?;
    let repo = TagRepository::new(db);

    let edited = repo
        .update(tag.id, "new".to_string(), "Fresh content".to_string())
        .await?
        .unwrap();
    assert_eq!(edited.name, "new");
    assert_eq!(edited.content, "Fresh content");

    let moved = repo.set_owner(tag.id, 9).await?.unwrap();
    assert_eq!(moved.owner_id, 9);
    assert_eq!(moved.author_id.to_string(), tag.author_id);

    Ok(())
}

/// Tests deleting a tag.
///
/// Expected: Ok(true) then Ok(false)
#[tokio::test]
async fn deletes_tag() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::create_guild_config(db).await?;
    let tag = factory::create_tag(db, &config.guild_id).await?;
    let repo = TagRepository::new(db);

    assert!(repo.delete(tag.id).await?);
    assert!(!repo.delete(tag.id).await?);

    Ok(())
}
