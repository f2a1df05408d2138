use serenity::all::Role;

/// Creates a Serenity `Role` with the given permission bits.
///
/// # Arguments
/// - `role_id` - Role snowflake; pass the guild ID to build the `@everyone` role
/// - `guild_id` - Guild the role belongs to
/// - `permissions` - Raw permission bitfield
/// - `position` - Position in the role hierarchy
///
/// # Panics
/// - If the JSON no longer matches Serenity's `Role` shape
pub fn create_test_role(role_id: u64, guild_id: u64, permissions: u64, position: i16) -> Role {
    serde_json::from_value(serde_json::json!({
        "id": role_id.to_string(),
        "guild_id": guild_id.to_string(),
        "name": format!("role-{}", role_id),
        "color": 0,
        "hoist": false,
        "icon": null,
        "unicode_emoji": null,
        "position": position,
        "permissions": permissions.to_string(),
        "managed": false,
        "mentionable": true,
    }))
    .expect("Failed to create test role - invalid JSON structure")
}
