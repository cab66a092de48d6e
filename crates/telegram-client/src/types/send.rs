//! Request types for Bot API methods.

use serde::Serialize;

/// Text formatting mode for `sendMessage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
}

/// Parameters for `sendMessage`.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageParams {
    /// Target chat.
    pub chat_id: i64,

    /// The message text.
    pub text: String,

    /// Formatting mode, plain text when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,

    /// Disable link previews.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_web_page_preview: bool,
}

impl SendMessageParams {
    /// Create params for a plain text message.
    pub fn text(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            parse_mode: None,
            disable_web_page_preview: false,
        }
    }

    /// Create params for an HTML-formatted message.
    pub fn html(chat_id: i64, text: impl Into<String>) -> Self {
        Self::text(chat_id, text).with_parse_mode(ParseMode::Html)
    }

    /// Set the formatting mode.
    pub fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = Some(parse_mode);
        self
    }

    /// Disable link previews.
    pub fn without_preview(mut self) -> Self {
        self.disable_web_page_preview = true;
        self
    }
}

/// A command shown in the client's command menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotCommand {
    /// Command name without the leading slash.
    pub command: String,
    /// Short description.
    pub description: String,
}

impl BotCommand {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}

/// Parameters for `setMyCommands`.
#[derive(Debug, Clone, Serialize)]
pub struct SetMyCommandsParams {
    pub commands: Vec<BotCommand>,
}

/// Parameters for `getUpdates`.
#[derive(Debug, Clone, Serialize)]
pub struct GetUpdatesParams {
    /// First update id to return; confirms everything before it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,

    /// Long-poll timeout in seconds.
    pub timeout: u64,

    /// Update kinds to receive.
    pub allowed_updates: Vec<String>,
}

impl GetUpdatesParams {
    /// Poll for new messages only.
    pub fn messages(offset: Option<i64>, timeout: u64) -> Self {
        Self {
            offset,
            timeout,
            allowed_updates: vec!["message".to_string()],
        }
    }
}
