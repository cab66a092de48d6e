//! Inbound messages as seen by the handler.

use questionnaire::{Identity, UserId};
use telegram_client::Update;

/// A text message from a user, extracted from a Telegram update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Sender's user id; sessions are keyed by it.
    pub user_id: UserId,
    /// Chat to reply in.
    pub chat_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub text: String,
    /// Whether the message came from a group chat.
    pub is_group: bool,
}

impl IncomingMessage {
    /// Create a private-chat text message (chat id equals user id).
    pub fn text(user_id: UserId, text: impl Into<String>) -> Self {
        Self {
            user_id,
            chat_id: user_id,
            first_name: String::new(),
            last_name: None,
            username: None,
            text: text.into(),
            is_group: false,
        }
    }

    /// Extract a processable message from an update.
    ///
    /// Returns the reason the update is skipped otherwise.
    pub fn from_update(update: &Update) -> Result<Self, String> {
        let message = match (&update.message, &update.edited_message) {
            (Some(message), _) => message,
            (None, Some(_)) => return Err("edited message".to_string()),
            (None, None) => return Err("no message".to_string()),
        };

        let from = message
            .from
            .as_ref()
            .ok_or_else(|| "no sender".to_string())?;
        if from.is_bot {
            return Err("message from a bot".to_string());
        }

        let text = message
            .text
            .as_ref()
            .ok_or_else(|| "no text content".to_string())?;

        Ok(Self {
            user_id: from.id,
            chat_id: message.chat.id,
            first_name: from.first_name.clone(),
            last_name: from.last_name.clone(),
            username: from.username.clone(),
            text: text.clone(),
            is_group: !message.is_private(),
        })
    }

    /// The sender's identity, with placeholders for missing names.
    pub fn identity(&self) -> Identity {
        Identity::from_parts(
            self.user_id,
            Some(self.first_name.clone()),
            self.last_name.clone(),
            self.username.clone(),
        )
    }
}
