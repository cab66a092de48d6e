//! Error types for message-listener.

use database::DatabaseError;
use questionnaire::SessionError;
use telegram_client::TelegramError;
use thiserror::Error;

/// Errors raised while handling a single message.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Sending a reply failed.
    #[error("messenger error: {0}")]
    Messenger(#[from] TelegramError),

    /// Persisting a finished questionnaire failed.
    #[error("store error: {0}")]
    Store(#[from] DatabaseError),

    /// The session table rejected the message.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

/// Errors that stop the listener.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Missing or malformed configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Telegram API error.
    #[error("telegram error: {0}")]
    Telegram(#[from] TelegramError),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// Filesystem error while preparing the data directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The update stream ended unexpectedly.
    #[error("update stream ended")]
    StreamEnded,
}
