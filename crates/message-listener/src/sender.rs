//! Outbound messaging seam.

use async_trait::async_trait;
use telegram_client::{BotCommand, TelegramClient};

use crate::error::HandlerError;

/// Trait for delivering replies and reports.
///
/// Abstracted so the handler can be driven by Telegram or by tests.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send a plain text message to a chat.
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), HandlerError>;

    /// Send an HTML-formatted message to a chat.
    async fn send_html(&self, chat_id: i64, html: &str) -> Result<(), HandlerError>;

    /// Publish the bot's command menu as `(command, description)` pairs.
    async fn register_commands(&self, commands: &[(&str, &str)]) -> Result<(), HandlerError>;
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), HandlerError> {
        TelegramClient::send_text(self, chat_id, text).await?;
        Ok(())
    }

    async fn send_html(&self, chat_id: i64, html: &str) -> Result<(), HandlerError> {
        TelegramClient::send_html(self, chat_id, html).await?;
        Ok(())
    }

    async fn register_commands(&self, commands: &[(&str, &str)]) -> Result<(), HandlerError> {
        let commands = commands
            .iter()
            .map(|(command, description)| BotCommand::new(*command, *description))
            .collect();
        self.set_my_commands(commands).await?;
        tracing::info!("Registered bot commands");
        Ok(())
    }
}
