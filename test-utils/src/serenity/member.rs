use serenity::all::Member;

/// Creates a Serenity `Member` as returned by `GET /guilds/{guild.id}/members/{user.id}`.
///
/// # Arguments
/// - `guild_id` - Guild the member belongs to
/// - `user_id` - Snowflake of the member's user
/// - `roles` - Role IDs assigned to the member, not including `@everyone`
///
/// # Panics
/// - If the JSON no longer matches Serenity's `Member` shape
pub fn create_test_member(guild_id: u64, user_id: u64, roles: &[u64]) -> Member {
    let roles: Vec<String> = roles.iter().map(u64::to_string).collect();

    serde_json::from_value(serde_json::json!({
        "guild_id": guild_id.to_string(),
        "user": {
            "id": user_id.to_string(),
            "username": format!("user-{}", user_id),
            "discriminator": "0",
            "global_name": null,
            "avatar": null,
            "bot": false,
            "system": false,
            "mfa_enabled": false,
            "banner": null,
            "accent_color": null,
            "flags": 0,
            "premium_type": 0,
            "public_flags": 0,
        },
        "nick": null,
        "avatar": null,
        "roles": roles,
        "joined_at": "2024-01-01T00:00:00.000000+00:00",
        "premium_since": null,
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": false,
        "communication_disabled_until": null,
    }))
    .expect("Failed to create test member - invalid JSON structure")
}
