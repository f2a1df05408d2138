use super::*;

/// Tests creating a tag.
///
/// Expected: Ok(Some) owned by its author with zero uses
#[tokio::test]
async fn creates_tag_owned_by_author() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::create_guild_config(db).await?;
    let tag = TagRepository::new(db)
        .create(CreateTagParam {
            guild_id: config.guild_id.parse().unwrap(),
            name: "rules".to_string(),
            content: "Be nice.".to_string(),
            author_id: 42,
        })
        .await?
        .unwrap();

    assert_eq!(tag.name, "rules");
    assert_eq!(tag.author_id, 42);
    assert_eq!(tag.owner_id, 42);
    assert_eq!(tag.uses, 0);

    Ok(())
}

/// Tests creating a tag whose name is taken.
///
/// Expected: Ok(None) in the same guild, Ok(Some) in another guild
#[tokio::test]
async fn rejects_duplicate_name_per_guild() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::create_guild_config(db).await?;
    let other = factory::create_guild_config(db).await?;
    factory::tag::TagFactory::new(db, &config.guild_id)
        .name("rules")
        .build()
        .await?;

    let repo = TagRepository::new(db);
    let param = |guild_id: &str| CreateTagParam {
        guild_id: guild_id.parse().unwrap(),
        name: "rules".to_string(),
        content: "Again".to_string(),
        author_id: 7,
    };

    assert!(repo.create(param(&config.guild_id)).await?.is_none());
    assert!(repo.create(param(&other.guild_id)).await?.is_some());

    Ok(())
}
