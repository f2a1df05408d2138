use super::*;

/// Tests autocomplete name search.
///
/// Expected: Ok with matching names from this guild, capped at the limit
#[tokio::test]
async fn searches_names_in_guild() -> Result<(), AppError> {
    let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = factory::create_guild_config(db).await?;
    let other = factory::create_guild_config(db).await?;
    for name in ["setup-guide", "setup-faq", "setup-video"] {
        factory::tag::TagFactory::new(db, &config.guild_id)
            .name(name)
            .build()
            .await?;
    }
    factory::tag::TagFactory::new(db, &other.guild_id)
        .name("setup-elsewhere")
        .build()
        .await?;

    let names = TagRepository::new(db)
        .search_names(config.guild_id.parse().unwrap(), "setup", 2)
        .await?;

    assert_eq!(names.len(), 2);
    assert!(!names.contains(&"setup-elsewhere".to_string()));

    Ok(())
}
