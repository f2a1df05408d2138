use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct TicketDto {
    pub id: i32,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub guild_id: u64,
    pub number: i64,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub author_id: u64,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub channel_id: u64,
    pub subject: Option<String>,
    pub opened_at: DateTime<Utc>,
    pub locked: bool,
}

/// Body of `POST /api/guilds/{guild_id}/tickets/{ticket_id}/lock`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct LockTicketDto {
    pub locked: bool,
}
