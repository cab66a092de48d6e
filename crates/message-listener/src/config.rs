//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use telegram_client::{TelegramConfig, DEFAULT_API_URL};

use crate::error::ListenerError;

/// Default location of the SQLite database file.
pub const DEFAULT_SQLITE_PATH: &str = "./data/user_data.db";

/// Bot configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram API settings (token, endpoint, poll timeout).
    pub telegram: TelegramConfig,
    /// Chat that receives completed reports.
    pub operator_chat_id: i64,
    /// SQLite connection URL.
    pub database_url: String,
    /// Database file, when `SQLITE_PATH` is a plain path.
    pub database_path: Option<PathBuf>,
}

impl BotConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `TELEGRAM_BOT_TOKEN` | Bot token | (required) |
    /// | `OPERATOR_CHAT_ID` | Chat id receiving reports | (required) |
    /// | `SQLITE_PATH` | Database file path or `sqlite:` URL | `./data/user_data.db` |
    /// | `TELEGRAM_API_URL` | Bot API endpoint | `https://api.telegram.org` |
    /// | `TELEGRAM_POLL_TIMEOUT_SECS` | Long-poll timeout | `25` |
    pub fn from_env() -> Result<Self, ListenerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ListenerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = var("TELEGRAM_BOT_TOKEN").ok_or_else(|| {
            ListenerError::Config("TELEGRAM_BOT_TOKEN environment variable is required".to_string())
        })?;

        let operator_chat_id = var("OPERATOR_CHAT_ID")
            .ok_or_else(|| {
                ListenerError::Config(
                    "OPERATOR_CHAT_ID environment variable is required".to_string(),
                )
            })?
            .trim()
            .parse::<i64>()
            .map_err(|_| ListenerError::Config("OPERATOR_CHAT_ID must be an integer".to_string()))?;

        let api_url = var("TELEGRAM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let mut telegram = TelegramConfig::new(token).with_api_url(api_url);
        if let Some(secs) = var("TELEGRAM_POLL_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|_| {
                ListenerError::Config("TELEGRAM_POLL_TIMEOUT_SECS must be a number".to_string())
            })?;
            telegram = telegram.with_poll_timeout(Duration::from_secs(secs));
        }
        telegram.validate()?;

        let sqlite = var("SQLITE_PATH").unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_string());
        let (database_url, database_path) = sqlite_url(&sqlite);

        Ok(Self {
            telegram,
            operator_chat_id,
            database_url,
            database_path,
        })
    }

    /// Create the directory holding the database file, if any.
    pub fn ensure_data_dir(&self) -> Result<(), ListenerError> {
        let parent = self
            .database_path
            .as_ref()
            .and_then(|path| path.parent())
            .filter(|dir| !dir.as_os_str().is_empty());

        if let Some(dir) = parent {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

/// Turn `SQLITE_PATH` into a connection URL.
///
/// `sqlite:` URLs pass through untouched; anything else is a file path
/// opened in read-write-create mode.
fn sqlite_url(value: &str) -> (String, Option<PathBuf>) {
    if value.starts_with("sqlite:") {
        (value.to_string(), None)
    } else {
        (format!("sqlite:{}?mode=rwc", value), Some(PathBuf::from(value)))
    }
}
