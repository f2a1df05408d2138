use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Guild entry from `GET /users/@me/guilds`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct PartialGuildDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub owner: bool,
    /// Permission bitfield of the user in this guild, as a decimal string.
    #[serde(default)]
    pub permissions: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct RoleDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub id: u64,
    pub name: String,
    pub colour: u32,
    pub position: u16,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ChannelDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub id: u64,
    pub name: String,
    /// `text`, `category`, `voice`, ...
    pub kind: String,
    #[serde(with = "crate::model::snowflake::option")]
    #[schema(value_type = Option<String>)]
    pub parent_id: Option<u64>,
}

/// Guild as seen by the bot.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct GuildDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub id: u64,
    pub name: String,
    pub icon: Option<String>,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub owner_id: u64,
    pub description: Option<String>,
    pub roles: Vec<RoleDto>,
    pub channels: Vec<ChannelDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct TicketQuestionDto {
    pub id: i32,
    pub label: String,
    pub placeholder: String,
    pub min_length: i32,
    pub max_length: i32,
    pub required: bool,
    pub default_value: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct GuildConfigDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub guild_id: u64,
    pub ticket_counter: i64,
    #[serde(with = "crate::model::snowflake::option")]
    #[schema(value_type = Option<String>)]
    pub ticket_category: Option<u64>,
    #[serde(with = "crate::model::snowflake::option")]
    #[schema(value_type = Option<String>)]
    pub log_channel: Option<u64>,
    #[serde(with = "crate::model::snowflake::vec")]
    #[schema(value_type = Vec<String>)]
    pub support_roles: Vec<u64>,
    pub ping_support_roles: bool,
    pub max_tickets: i32,
    pub support_enabled: bool,
    pub questions: Vec<TicketQuestionDto>,
}
