//! Telegram Bot API HTTP client.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::TelegramConfig;
use crate::error::TelegramError;
use crate::types::{
    ApiResponse, BotCommand, GetUpdatesParams, Message, SendMessageParams, SetMyCommandsParams,
    Update, User,
};

/// Timeout for ordinary method calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Extra time allowed on top of the long-poll timeout before giving up on `getUpdates`.
const POLL_GRACE: Duration = Duration::from_secs(10);

/// Client for the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    config: TelegramConfig,
    connected: Arc<AtomicBool>,
}

impl TelegramClient {
    /// Create a client and verify the token with `getMe`.
    pub async fn connect(config: TelegramConfig) -> Result<Self, TelegramError> {
        let client = Self::new(config)?;

        let me = client.get_me().await?;
        if !me.is_bot {
            return Err(TelegramError::HealthCheckFailed);
        }
        client.connected.store(true, Ordering::SeqCst);
        info!(
            "Connected to Telegram as @{} (id {})",
            me.username.as_deref().unwrap_or("?"),
            me.id
        );

        Ok(client)
    }

    /// Create a client without contacting the API.
    pub fn new(config: TelegramConfig) -> Result<Self, TelegramError> {
        config.validate()?;

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(TelegramError::Http)?;

        Ok(Self {
            http,
            config,
            connected: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Whether the last API call succeeded.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Get the bot's own user.
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call::<(), _>("getMe", None, None).await
    }

    /// Check that the API accepts our token.
    pub async fn health_check(&self) -> Result<bool, TelegramError> {
        match self.get_me().await {
            Ok(me) => Ok(me.is_bot),
            Err(TelegramError::Api { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Send a message using the full parameter structure.
    pub async fn send_message(&self, params: SendMessageParams) -> Result<Message, TelegramError> {
        self.call("sendMessage", Some(params), None).await
    }

    /// Send a plain text message to a chat.
    pub async fn send_text(&self, chat_id: i64, text: &str) -> Result<Message, TelegramError> {
        self.send_message(SendMessageParams::text(chat_id, text))
            .await
    }

    /// Send an HTML-formatted message to a chat.
    pub async fn send_html(&self, chat_id: i64, html: &str) -> Result<Message, TelegramError> {
        self.send_message(SendMessageParams::html(chat_id, html).without_preview())
            .await
    }

    /// Replace the bot's command menu.
    pub async fn set_my_commands(&self, commands: Vec<BotCommand>) -> Result<(), TelegramError> {
        let accepted: bool = self
            .call("setMyCommands", Some(SetMyCommandsParams { commands }), None)
            .await?;
        if !accepted {
            return Err(TelegramError::Api {
                code: -1,
                description: "setMyCommands returned false".to_string(),
            });
        }
        Ok(())
    }

    /// Long-poll for updates after `offset`.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: Duration,
    ) -> Result<Vec<Update>, TelegramError> {
        let params = GetUpdatesParams::messages(offset, timeout.as_secs());
        self.call("getUpdates", Some(params), Some(timeout + POLL_GRACE))
            .await
    }

    /// Get the configuration.
    pub fn config(&self) -> &TelegramConfig {
        &self.config
    }

    /// Get the underlying HTTP client.
    pub fn http_client(&self) -> &Client {
        &self.http
    }

    /// Call a Bot API method.
    ///
    /// The API reports failures in the JSON body (`ok: false`) even on
    /// non-2xx statuses, so the body is always parsed.
    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: Option<P>,
        timeout: Option<Duration>,
    ) -> Result<R, TelegramError> {
        let url = self.config.method_url(method);
        debug!("API call: {}", method);

        let mut request = self.http.post(&url);
        if let Some(params) = params.as_ref() {
            request = request.json(params);
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                self.connected.store(false, Ordering::SeqCst);
                return Err(TelegramError::Http(e.without_url()));
            }
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TelegramError::Http(e.without_url()))?;
        let parsed: ApiResponse<R> = serde_json::from_str(&body)?;

        if !parsed.ok {
            return Err(TelegramError::Api {
                code: parsed.error_code.unwrap_or(i32::from(status.as_u16())),
                description: parsed
                    .description
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            });
        }

        self.connected.store(true, Ordering::SeqCst);
        parsed.result.ok_or_else(|| TelegramError::Api {
            code: -1,
            description: format!("{} returned no result", method),
        })
    }
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("config", &self.config)
            .field("connected", &self.is_connected())
            .finish()
    }
}
