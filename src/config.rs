//! Process configuration — loaded once at startup, immutable thereafter.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Service configuration.
#[derive(Clone)]
pub struct BotConfig {
    /// LINE channel secret; keys webhook signature verification.
    pub channel_secret: SecretString,
    /// LINE channel access token; authorizes outbound reply calls.
    pub channel_access_token: SecretString,
    /// Port for the webhook HTTP server.
    pub port: u16,
    /// Path to the local user database file.
    pub db_path: String,
}

impl BotConfig {
    /// Load configuration from the environment.
    ///
    /// `LINE_CHANNEL_SECRET` and `LINE_CHANNEL_ACCESS_TOKEN` are required;
    /// `BOT_PORT` and `BOT_DB_PATH` fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let channel_secret = require_env("LINE_CHANNEL_SECRET")?;
        let channel_access_token = require_env("LINE_CHANNEL_ACCESS_TOKEN")?;

        let port = match std::env::var("BOT_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "BOT_PORT".to_string(),
                message: format!("not a valid port: {raw}"),
            })?,
            Err(_) => 8080,
        };

        let db_path =
            std::env::var("BOT_DB_PATH").unwrap_or_else(|_| "./data/line-onboard.db".to_string());

        Ok(Self {
            channel_secret: SecretString::from(channel_secret),
            channel_access_token: SecretString::from(channel_access_token),
            port,
            db_path,
        })
    }
}

fn require_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}
