use serenity::all::{PartialGuild, Role};

/// Creates a Serenity `PartialGuild` as returned by `GET /guilds/{guild.id}`.
///
/// # Arguments
/// - `guild_id` - Guild snowflake
/// - `owner_id` - Owner of the guild; always resolves to every permission
/// - `roles` - Guild roles, which should include `@everyone` (role ID equal to the guild ID)
///
/// # Panics
/// - If the JSON no longer matches Serenity's `PartialGuild` shape
pub fn create_test_partial_guild(guild_id: u64, owner_id: u64, roles: Vec<Role>) -> PartialGuild {
    let roles = serde_json::to_value(roles).expect("Failed to serialize test roles");

    serde_json::from_value(serde_json::json!({
        "id": guild_id.to_string(),
        "name": "Test Guild",
        "icon": null,
        "icon_hash": null,
        "splash": null,
        "discovery_splash": null,
        "owner_id": owner_id.to_string(),
        "region": null,
        "afk_channel_id": null,
        "afk_timeout": 300,
        "widget_enabled": false,
        "widget_channel_id": null,
        "verification_level": 0,
        "default_message_notifications": 0,
        "explicit_content_filter": 0,
        "roles": roles,
        "emojis": [],
        "stickers": [],
        "features": [],
        "mfa_level": 0,
        "application_id": null,
        "system_channel_id": null,
        "system_channel_flags": 0,
        "rules_channel_id": null,
        "max_presences": null,
        "max_members": 500000,
        "vanity_url_code": null,
        "description": null,
        "banner": null,
        "premium_tier": 0,
        "premium_subscription_count": 0,
        "preferred_locale": "en-US",
        "public_updates_channel_id": null,
        "safety_alerts_channel_id": null,
        "max_video_channel_users": 25,
        "max_stage_video_channel_users": 50,
        "nsfw": false,
        "nsfw_level": 0,
        "premium_progress_bar_enabled": false,
    }))
    .expect("Failed to create test partial guild - invalid JSON structure")
}
