//! Telegram message handling for the questionnaire bot.
//!
//! This crate connects the [`questionnaire`] core to its collaborators:
//! incoming Telegram updates are routed to one worker per user, each worker
//! drives the user's session through a [`QuestionnaireHandler`], and
//! finished questionnaires are stored and reported to the operator.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use database::Database;
//! use message_listener::{MessageProcessor, QuestionnaireHandler};
//! use questionnaire::SessionTable;
//! use telegram_client::{TelegramClient, TelegramConfig};
//!
//! # async fn example() -> Result<(), message_listener::ListenerError> {
//! let client = TelegramClient::connect(TelegramConfig::new("123456:ABC-DEF")).await?;
//! let db = Database::connect("sqlite:user_data.db?mode=rwc").await?;
//! db.migrate().await?;
//!
//! let sessions = Arc::new(SessionTable::new());
//! let handler = QuestionnaireHandler::new(sessions, client.clone(), db, 123456789);
//! let processor = MessageProcessor::with_defaults(handler);
//!
//! // Runs until the update stream ends
//! processor.run(telegram_client::subscribe(&client)).await?;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod handler;
pub mod message;
pub mod processor;
pub mod sender;
pub mod store;

#[cfg(test)]
mod testing;

pub use command::Command;
pub use config::BotConfig;
pub use error::{HandlerError, ListenerError};
pub use handler::{Outcome, QuestionnaireHandler};
pub use message::IncomingMessage;
pub use processor::{MessageProcessor, ProcessorConfig};
pub use sender::Messenger;
pub use store::{to_row, ResultStore};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
