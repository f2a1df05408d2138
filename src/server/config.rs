//! Environment configuration.
//!
//! Read once at startup after `.env` is loaded. See `.env.example`.

use std::net::SocketAddr;

use crate::server::error::{config::ConfigError, AppError};

pub const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
pub const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";

const DEFAULT_APP_URL: &str = "http://localhost:8080";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

pub struct Config {
    pub database_url: String,

    pub discord_bot_token: String,
    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_redirect_url: String,

    pub discord_auth_url: String,
    pub discord_token_url: String,

    /// Origin of the dashboard frontend, allowed by CORS.
    pub app_url: String,
    pub bind_address: SocketAddr,

    /// Guilds that get the slash commands registered directly, for fast iteration.
    /// Empty means global registration.
    pub debug_guilds: Vec<u64>,
    /// Bot owner shown by `/about`.
    pub owner_id: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let bind_address = optional("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            discord_client_id: required("DISCORD_CLIENT_ID")?,
            discord_client_secret: required("DISCORD_CLIENT_SECRET")?,
            discord_redirect_url: required("DISCORD_REDIRECT_URL")?,
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            app_url: optional("APP_URL").unwrap_or_else(|| DEFAULT_APP_URL.to_string()),
            bind_address: parse("BIND_ADDRESS", &bind_address)?,
            debug_guilds: parse_id_list("DEBUG_GUILDS", optional("DEBUG_GUILDS").as_deref())?,
            owner_id: optional("OWNER_ID")
                .map(|value| parse("OWNER_ID", &value))
                .transpose()?,
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    optional(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

/// Unset and blank variables both count as missing.
fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Parses a comma-separated list of snowflakes, skipping empty entries.
fn parse_id_list(name: &str, value: Option<&str>) -> Result<Vec<u64>, ConfigError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };

    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| parse(name, id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_debug_guild_list() {
        let ids = parse_id_list("DEBUG_GUILDS", Some("1, 2,,3 ")).unwrap();

        assert_eq!(ids, vec![1, 2, 3]);
        assert!(parse_id_list("DEBUG_GUILDS", None).unwrap().is_empty());
    }

    /// Expected: the offending entry is reported with the variable name
    #[test]
    fn rejects_invalid_snowflake() {
        let err = parse_id_list("DEBUG_GUILDS", Some("1,abc")).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref name, ref value } if name == "DEBUG_GUILDS" && value == "abc"
        ));
    }

    #[test]
    fn parses_bind_address() {
        let addr: SocketAddr = parse("BIND_ADDRESS", DEFAULT_BIND_ADDRESS).unwrap();

        assert_eq!(addr.port(), 8080);
        assert!(parse::<SocketAddr>("BIND_ADDRESS", "nowhere").is_err());
    }
}
