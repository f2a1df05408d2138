/// A configured guild with ID `1`, category `10` and log channel `11`.
pub fn entity() -> entity::guild_config::Model {
    entity::guild_config::Model {
        id: 1,
        guild_id: "1".to_string(),
        ticket_counter: 1,
        ticket_category: Some("10".to_string()),
        log_channel: Some("11".to_string()),
        ping_support_roles: true,
        max_tickets: 50,
        support_enabled: true,
    }
}
