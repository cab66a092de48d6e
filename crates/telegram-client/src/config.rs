//! Configuration types for telegram-client.

use std::time::Duration;

use crate::error::TelegramError;

/// Default Bot API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Default long-poll timeout for `getUpdates`.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(25);

/// Configuration for connecting to the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Base URL of the Bot API (e.g., "https://api.telegram.org").
    pub api_url: String,
    /// Bot token issued by BotFather.
    pub token: String,
    /// How long a single `getUpdates` call may wait for new updates.
    pub poll_timeout: Duration,
}

impl TelegramConfig {
    /// Create a configuration for the public Bot API.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: token.into(),
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        }
    }

    /// Point the client at a different API server (local Bot API server, test double).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the long-poll timeout.
    pub fn with_poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }

    /// Check that the configuration can be used.
    pub fn validate(&self) -> Result<(), TelegramError> {
        if self.token.trim().is_empty() {
            return Err(TelegramError::Config("bot token is empty".to_string()));
        }
        if self.token.contains('/') || self.token.chars().any(char::is_whitespace) {
            return Err(TelegramError::Config(
                "bot token contains invalid characters".to_string(),
            ));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(TelegramError::Config(format!(
                "API URL must start with http:// or https://: {}",
                self.api_url
            )));
        }
        Ok(())
    }

    /// Get the URL of a Bot API method.
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    /// Token with everything but the bot id masked, for logs.
    pub fn redacted_token(&self) -> String {
        match self.token.split_once(':') {
            Some((bot_id, _)) => format!("{}:***", bot_id),
            None => "***".to_string(),
        }
    }
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.redacted_token())
            .field("poll_timeout", &self.poll_timeout)
            .finish()
    }
}
