use serenity::all::{GuildChannel, PermissionOverwrite};

/// Creates a Serenity text `GuildChannel` with the given permission overwrites.
///
/// # Panics
/// - If the JSON no longer matches Serenity's `GuildChannel` shape
pub fn create_test_channel(
    channel_id: u64,
    guild_id: u64,
    overwrites: &[PermissionOverwrite],
) -> GuildChannel {
    let overwrites =
        serde_json::to_value(overwrites).expect("Failed to serialize test permission overwrites");

    serde_json::from_value(serde_json::json!({
        "id": channel_id.to_string(),
        "type": 0,
        "guild_id": guild_id.to_string(),
        "position": 0,
        "permission_overwrites": overwrites,
        "name": format!("ticket-{}", channel_id),
        "topic": null,
        "nsfw": false,
        "last_message_id": null,
        "rate_limit_per_user": 0,
        "parent_id": null,
        "flags": 0,
    }))
    .expect("Failed to create test channel - invalid JSON structure")
}
