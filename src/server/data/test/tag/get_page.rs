use super::*;

/// Tests paging through tags.
///
/// Expected: Ok with most used first and the total across pages
#[tokio::test]
async fn pages_by_uses_then_name() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::create_guild_config(db).await?;
    for (name, uses) in [("alpha", 1), ("beta", 5), ("gamma", 5), ("delta", 0)] {
        factory::tag::TagFactory::new(db, &config.guild_id)
            .name(name)
            .uses(uses)
            .build()
            .await?;
    }

    let repo = TagRepository::new(db);
    let guild_id = config.guild_id.parse().unwrap();

    let (first, total) = repo.get_page(guild_id, None, 0, 3).await?;
    let names: Vec<_> = first.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(total, 4);
    assert_eq!(names, vec!["beta", "gamma", "alpha"]);

    let (second, _) = repo.get_page(guild_id, None, 1, 3).await?;
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].name, "delta");

    Ok(())
}

/// Tests filtering a page by name.
///
/// Expected: Ok with only matching tags counted
#[tokio::test]
async fn filters_by_search() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::create_guild_config(db).await?;
    for name in ["faq-billing", "faq-login", "rules"] {
        factory::tag::TagFactory::new(db, &config.guild_id)
            .name(name)
            .build()
            .await?;
    }

    let (tags, total) = TagRepository::new(db)
        .get_page(config.guild_id.parse().unwrap(), Some("faq"), 0, 10)
        .await?;

    assert_eq!(total, 2);
    assert!(tags.iter().all(|t| t.name.starts_with("faq")));

    Ok(())
}
