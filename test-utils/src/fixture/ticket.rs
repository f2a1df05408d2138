use chrono::{TimeZone, Utc};

/// Unlocked ticket `#1` in guild `1`, opened by member `100` in channel `200`.
pub fn entity() -> entity::ticket::Model {
    entity::ticket::Model {
        id: 1,
        guild_id: "1".to_string(),
        number: 1,
        author_id: "100".to_string(),
        channel_id: "200".to_string(),
        subject: Some("Need help".to_string()),
        opened_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        locked: false,
    }
}
