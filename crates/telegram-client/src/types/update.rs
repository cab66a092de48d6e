//! Update and message types received from the Bot API.

use serde::{Deserialize, Serialize};

/// Envelope every Bot API method answers with.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the call succeeded.
    pub ok: bool,

    /// The method result when `ok` is true.
    pub result: Option<T>,

    /// Error code when `ok` is false.
    #[serde(default)]
    pub error_code: Option<i32>,

    /// Human-readable error when `ok` is false.
    #[serde(default)]
    pub description: Option<String>,
}

/// An incoming update from `getUpdates`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Update {
    /// Monotonic update id; the next poll starts after the highest seen.
    pub update_id: i64,

    /// New incoming message, if this update carries one.
    #[serde(default)]
    pub message: Option<Message>,

    /// Edited message. Received but ignored by the bot.
    #[serde(default)]
    pub edited_message: Option<Message>,
}

/// A chat message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    /// Message id within the chat.
    pub message_id: i64,

    /// Sender; absent for channel posts.
    #[serde(default)]
    pub from: Option<User>,

    /// Chat the message belongs to.
    pub chat: Chat,

    /// Unix time the message was sent.
    #[serde(default)]
    pub date: i64,

    /// Text content, for text messages.
    #[serde(default)]
    pub text: Option<String>,
}

impl Message {
    /// Whether the message was sent in a one-to-one chat with the bot.
    pub fn is_private(&self) -> bool {
        self.chat.kind == "private"
    }
}

/// A Telegram user or bot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    /// Unique user id.
    pub id: i64,

    /// Whether this user is a bot.
    #[serde(default)]
    pub is_bot: bool,

    /// First name.
    #[serde(default)]
    pub first_name: String,

    /// Last name, if set.
    #[serde(default)]
    pub last_name: Option<String>,

    /// Public @username, if set.
    #[serde(default)]
    pub username: Option<String>,
}

/// A chat.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chat {
    /// Unique chat id. Equals the user id for private chats.
    pub id: i64,

    /// "private", "group", "supergroup" or "channel".
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Title, for groups and channels.
    #[serde(default)]
    pub title: Option<String>,
}
