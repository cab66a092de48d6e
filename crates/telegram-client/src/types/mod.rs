//! Telegram Bot API types.

mod send;
mod update;

pub use send::{BotCommand, GetUpdatesParams, ParseMode, SendMessageParams, SetMyCommandsParams};
pub use update::{ApiResponse, Chat, Message, Update, User};
