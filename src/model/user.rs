use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Dashboard account as stored by the service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct UserDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub discord_id: u64,
    pub name: String,
}

/// Discord user object as returned by `GET /users/@me`.
///
/// Only the fields the dashboard displays are kept.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct DiscordUserDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Response of a successful OAuth callback.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct AuthorisedDto {
    pub status: String,
    pub user: DiscordUserDto,
}
