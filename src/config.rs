use crate::error::{config_error, BotResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;

/// Default directory for per-user credential files
pub const DEFAULT_CREDENTIALS_DIR: &str = "./credentials";

/// Main configuration structure for the bot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Telegram bot token
    pub telegram_token: String,
    /// Google Calendar API client ID
    pub google_client_id: String,
    /// Google Calendar API client secret
    pub google_client_secret: String,
    /// Directory holding one credential file per chat
    pub credentials_dir: String,
}

impl Config {
    /// Load configuration from the environment
    pub fn load() -> BotResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let telegram_token =
            env::var("TELEGRAM_BOT_TOKEN").map_err(|_| env_error("TELEGRAM_BOT_TOKEN"))?;
        let google_client_id =
            env::var("GOOGLE_CLIENT_ID").map_err(|_| env_error("GOOGLE_CLIENT_ID"))?;
        let google_client_secret =
            env::var("GOOGLE_CLIENT_SECRET").map_err(|_| env_error("GOOGLE_CLIENT_SECRET"))?;

        let credentials_dir = env::var("CREDENTIALS_DIR")
            .unwrap_or_else(|_| String::from(DEFAULT_CREDENTIALS_DIR));

        Ok(Config {
            telegram_token,
            google_client_id,
            google_client_secret,
            credentials_dir,
        })
    }
}

fn env_error(var: &str) -> crate::error::Error {
    config_error(&format!("Missing environment variable: {}", var))
}
