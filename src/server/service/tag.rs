//! Tag lookups and the ownership rules around editing them.

use std::fmt;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{guild_config::GuildConfigRepository, tag::TagRepository},
    error::AppError,
    model::tag::{
        normalize_tag_name, CreateTagParam, EditTagParam, Tag, MAX_TAG_CONTENT_LENGTH,
        MAX_TAG_NAME_LENGTH,
    },
    service::guild_config::NOT_CONFIGURED,
};

/// Tags per page of `/tag list`.
pub const TAGS_PER_PAGE: u64 = 10;
/// Discord accepts at most 25 autocomplete choices.
pub const AUTOCOMPLETE_LIMIT: u64 = 25;

/// Action a member attempts on someone else's tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAction {
    Delete,
    Edit,
    Transfer,
}

impl TagAction {
    fn verb(self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Edit => "edit",
            Self::Transfer => "transfer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagDenied {
    NotConfigured,
    NotFound,
    NameTaken,
    InvalidName,
    InvalidContent,
    NoPermission(TagAction),
    NoChanges,
}

impl fmt::Display for TagDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "{}", NOT_CONFIGURED),
            Self::NotFound => write!(f, "Tag not found."),
            Self::NameTaken => write!(f, "A tag with that name already exists."),
            Self::InvalidName => write!(
                f,
                "Tag names must be between 1 and {} characters long.",
                MAX_TAG_NAME_LENGTH
            ),
            Self::InvalidContent => write!(
                f,
                "Tag content must be between 1 and {} characters long.",
                MAX_TAG_CONTENT_LENGTH
            ),
            Self::NoPermission(action) => {
                write!(f, "You do not have permission to {} this tag.", action.verb())
            }
            Self::NoChanges => write!(f, "No changes were made."),
        }
    }
}

/// One page of `/tag list`.
#[derive(Debug, Clone, PartialEq)]
pub struct TagPage {
    pub tags: Vec<Tag>,
    /// Zero-indexed page actually returned, clamped to the last page.
    pub page: u64,
    pub pages: u64,
}

/// Owners and administrators may change a tag.
pub fn authorize(
    tag: &Tag,
    user_id: u64,
    is_admin: bool,
    action: TagAction,
) -> Result<(), TagDenied> {
    if is_admin || tag.owner_id == user_id {
        Ok(())
    } else {
        Err(TagDenied::NoPermission(action))
    }
}

fn valid_name(name: &str) -> bool {
    let length = name.chars().count();
    (1..=MAX_TAG_NAME_LENGTH).contains(&length)
}

fn valid_content(content: &str) -> bool {
    let length = content.chars().count();
    !content.trim().is_empty() && length <= MAX_TAG_CONTENT_LENGTH
}

pub struct TagService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TagService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Looks a tag up by name, normalizing the input first.
    pub async fn find(&self, guild_id: u64, name: &str) -> Result<Option<Tag>, AppError> {
        TagRepository::new(self.db)
            .find_by_name(guild_id, &normalize_tag_name(name))
            .await
    }

    pub async fn find_by_id(&self, guild_id: u64, id: i32) -> Result<Option<Tag>, AppError> {
        TagRepository::new(self.db).find_by_id(guild_id, id).await
    }

    /// Looks a tag up for display and counts the use.
    pub async fn use_tag(&self, guild_id: u64, name: &str) -> Result<Option<Tag>, AppError> {
        let Some(mut tag) = self.find(guild_id, name).await? else {
            return Ok(None);
        };

        TagRepository::new(self.db).increment_uses(tag.id).await?;
        tag.uses = tag.uses.saturating_add(1);

        Ok(Some(tag))
    }

    /// Names for the autocomplete of the `tag` option.
    pub async fn autocomplete(&self, guild_id: u64, query: &str) -> Result<Vec<String>, AppError> {
        TagRepository::new(self.db)
            .search_names(guild_id, &normalize_tag_name(query), AUTOCOMPLETE_LIMIT)
            .await
    }

    pub async fn list_all(&self, guild_id: u64) -> Result<Vec<Tag>, AppError> {
        TagRepository::new(self.db).get_by_guild_id(guild_id).await
    }

    /// Gets a page of tags, clamping `page` to the last page.
    pub async fn page(
        &self,
        guild_id: u64,
        search: Option<&str>,
        page: u64,
    ) -> Result<TagPage, AppError> {
        let repo = TagRepository::new(self.db);
        let search = search
            .map(normalize_tag_name)
            .filter(|search| !search.is_empty());

        let (_, total) = repo
            .get_page(guild_id, search.as_deref(), 0, TAGS_PER_PAGE)
            .await?;
        let pages = total.div_ceil(TAGS_PER_PAGE);
        let page = page.min(pages.saturating_sub(1));

        let (tags, _) = repo
            .get_page(guild_id, search.as_deref(), page, TAGS_PER_PAGE)
            .await?;

        Ok(TagPage { tags, page, pages })
    }

    /// Creates a tag owned by its author.
    pub async fn create(
        &self,
        guild_id: u64,
        author_id: u64,
        name: &str,
        content: String,
    ) -> Result<Result<Tag, TagDenied>, AppError> {
        if GuildConfigRepository::new(self.db)
            .find_by_guild_id(guild_id)
            .await?
            .is_none()
        {
            return Ok(Err(TagDenied::NotConfigured));
        }

        let name = normalize_tag_name(name);
        if !valid_name(&name) {
            return Ok(Err(TagDenied::InvalidName));
        }
        if !valid_content(&content) {
            return Ok(Err(TagDenied::InvalidContent));
        }

        let tag = TagRepository::new(self.db)
            .create(CreateTagParam {
                guild_id,
                name,
                content,
                author_id,
            })
            .await?;

        Ok(tag.ok_or(TagDenied::NameTaken))
    }

    /// Applies the edit modal to a tag.
    ///
    /// Blank fields keep their current value. Renaming a tag to its own name
    /// is not a change.
    pub async fn edit(
        &self,
        tag: &Tag,
        param: EditTagParam,
    ) -> Result<Result<Tag, TagDenied>, AppError> {
        let name = param
            .name
            .map(|name| normalize_tag_name(&name))
            .filter(|name| !name.is_empty() && *name != tag.name);
        let content = param
            .content
            .filter(|content| !content.trim().is_empty() && *content != tag.content);

        if name.is_none() && content.is_none() {
            return Ok(Err(TagDenied::NoChanges));
        }

        if let Some(name) = &name {
            if !valid_name(name) {
                return Ok(Err(TagDenied::InvalidName));
            }
            if self.find(tag.guild_id, name).await?.is_some() {
                return Ok(Err(TagDenied::NameTaken));
            }
        }
        if let Some(content) = &content {
            if !valid_content(content) {
                return Ok(Err(TagDenied::InvalidContent));
            }
        }

        let updated = TagRepository::new(self.db)
            .update(
                tag.id,
                name.unwrap_or_else(|| tag.name.clone()),
                content.unwrap_or_else(|| tag.content.clone()),
            )
            .await?;

        Ok(updated.ok_or(TagDenied::NotFound))
    }

    /// Makes `owner_id` the owner of a tag. Used by transfer and claim.
    pub async fn set_owner(&self, tag: &Tag, owner_id: u64) -> Result<Option<Tag>, AppError> {
        let updated = TagRepository::new(self.db).set_owner(tag.id, owner_id).await?;
        if updated.is_some() {
            tracing::info!(
                "Tag {} in guild {} now owned by {}",
                tag.id,
                tag.guild_id,
                owner_id
            );
        }

        Ok(updated)
    }

    pub async fn delete(&self, tag: &Tag) -> Result<bool, AppError> {
        TagRepository::new(self.db).delete(tag.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    async fn configured_guild(db: &DatabaseConnection) -> Result<(), AppError> {
        factory::guild_config::GuildConfigFactory::new(db)
            .guild_id("1")
            .build()
            .await?;
        Ok(())
    }

    /// Expected: stored lower-cased and trimmed, duplicate refused
    #[tokio::test]
    async fn creates_normalized_tag() -> Result<(), AppError> {
        let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        configured_guild(db).await?;

        let service = TagService::new(db);
        let tag = service
            .create(1, 10, "  Rules ", "Be nice.".to_string())
            .await?
            .unwrap();

        assert_eq!(tag.name, "rules");
        assert_eq!(tag.owner_id, 10);
        assert_eq!(
            service.create(1, 11, "RULES", "Other".to_string()).await?,
            Err(TagDenied::NameTaken)
        );

        Ok(())
    }

    /// Expected: NotConfigured before /setup
    #[tokio::test]
    async fn create_requires_configuration() -> Result<(), AppError> {
        let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let result = TagService::new(db)
            .create(1, 10, "rules", "Be nice.".to_string())
            .await?;

        assert_eq!(result, Err(TagDenied::NotConfigured));

        Ok(())
    }

    /// Expected: uses incremented on each view
    #[tokio::test]
    async fn viewing_counts_uses() -> Result<(), AppError> {
        let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        configured_guild(db).await?;
        factory::tag::TagFactory::new(db, "1").name("faq").uses(3).build().await?;

        let service = TagService::new(db);
        let tag = service.use_tag(1, "FAQ").await?.unwrap();
        assert_eq!(tag.uses, 4);

        let stored = service.find(1, "faq").await?.unwrap();
        assert_eq!(stored.uses, 4);
        assert!(service.use_tag(1, "missing").await?.is_none());

        Ok(())
    }

    /// Expected: blank fields are no change, taken names refused
    #[tokio::test]
    async fn edit_rules() -> Result<(), AppError> {
        let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        configured_guild(db).await?;
        factory::tag::TagFactory::new(db, "1").name("taken").build().await?;
        let entity = factory::tag::TagFactory::new(db, "1")
            .name("faq")
            .content("old")
            .build()
            .await?;
        let tag = Tag::from_entity(entity)?;

        let service = TagService::new(db);

        let unchanged = EditTagParam {
            name: Some("  FAQ".to_string()),
            content: Some(String::new()),
        };
        assert_eq!(service.edit(&tag, unchanged).await?, Err(TagDenied::NoChanges));

        let clash = EditTagParam {
            name: Some("Taken".to_string()),
            content: None,
        };
        assert_eq!(service.edit(&tag, clash).await?, Err(TagDenied::NameTaken));

        let edited = service
            .edit(
                &tag,
                EditTagParam {
                    name: None,
                    content: Some("new".to_string()),
                },
            )
            .await?
            .unwrap();
        assert_eq!(edited.name, "faq");
        assert_eq!(edited.content, "new");

        Ok(())
    }

    /// Expected: page index clamps to the last page
    #[tokio::test]
    async fn pages_are_clamped() -> Result<(), AppError> {
        let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        configured_guild(db).await?;
        for n in 0..12 {
            factory::tag::TagFactory::new(db, "1").uses(n).build().await?;
        }

        let page = TagService::new(db).page(1, None, 7).await?;

        assert_eq!(page.pages, 2);
        assert_eq!(page.page, 1);
        assert_eq!(page.tags.len(), 2);

        Ok(())
    }

    #[test]
    fn only_owner_or_admin_may_change() {
        let tag = Tag {
            id: 1,
            guild_id: 1,
            name: "faq".to_string(),
            content: "x".to_string(),
            author_id: 5,
            owner_id: 6,
            uses: 0,
            created_at: chrono::Utc::now(),
        };

        assert!(authorize(&tag, 6, false, TagAction::Edit).is_ok());
        assert!(authorize(&tag, 7, true, TagAction::Delete).is_ok());
        assert_eq!(
            authorize(&tag, 5, false, TagAction::Transfer),
            Err(TagDenied::NoPermission(TagAction::Transfer))
        );
        assert_eq!(
            TagDenied::NoPermission(TagAction::Delete).to_string(),
            "You do not have permission to delete this tag."
        );
    }
}
