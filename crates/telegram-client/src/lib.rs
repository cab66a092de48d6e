//! Telegram Bot API client library.
//!
//! This crate provides a small Rust client for the Telegram Bot HTTP API.
//! It supports:
//!
//! - Sending plain and HTML messages
//! - Receiving messages via long polling (`getUpdates`)
//! - Registering the bot's command menu
//!
//! # Example
//!
//! ```no_run
//! use telegram_client::{TelegramClient, TelegramConfig};
//!
//! # async fn example() -> Result<(), telegram_client::TelegramError> {
//! // Connect (verifies the token with getMe)
//! let config = TelegramConfig::new("123456:ABC-DEF");
//! let client = TelegramClient::connect(config).await?;
//!
//! // Send a message
//! let sent = client.send_text(123456789, "Hello!").await?;
//! println!("Sent message {}", sent.message_id);
//!
//! // Receive incoming messages
//! use futures::StreamExt;
//! let mut updates = telegram_client::subscribe(&client);
//! while let Some(result) = updates.next().await {
//!     match result {
//!         Ok(update) => {
//!             if let Some(msg) = update.message {
//!                 println!("From {}: {:?}", msg.chat.id, msg.text);
//!             }
//!         }
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod poll;
pub mod types;

pub use client::TelegramClient;
pub use config::{TelegramConfig, DEFAULT_API_URL, DEFAULT_POLL_TIMEOUT};
pub use error::TelegramError;
pub use poll::{subscribe, subscribe_with_config, PollConfig, UpdateStream};
pub use types::*;

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
