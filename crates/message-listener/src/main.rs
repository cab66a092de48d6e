//! Telegram personality questionnaire bot.
//!
//! Walks users through the questionnaire, stores their answers in SQLite and
//! forwards a personality report to the operator chat.

use std::sync::Arc;

use database::Database;
use message_listener::{BotConfig, ListenerError, MessageProcessor, Messenger, QuestionnaireHandler};
use questionnaire::{prompts, SessionTable};
use telegram_client::TelegramClient;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ListenerError> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new(
                    "info,questionnaire=info,database=info,telegram_client=info,message_listener=info",
                )
            }),
        )
        .init();

    let config = BotConfig::from_env()?;
    info!(
        operator = config.operator_chat_id,
        database = %config.database_url,
        "Starting questionnaire bot"
    );

    // Connect to database
    config.ensure_data_dir()?;
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Connect to Telegram
    let client = TelegramClient::connect(config.telegram.clone()).await?;
    if let Err(e) = client.register_commands(&prompts::COMMANDS).await {
        error!("Failed to register bot commands: {}", e);
    }

    let sessions = Arc::new(SessionTable::new());
    let mut handler = QuestionnaireHandler::new(
        Arc::clone(&sessions),
        client.clone(),
        db.clone(),
        config.operator_chat_id,
    );
    match client.get_me().await {
        Ok(me) => {
            if let Some(username) = me.username {
                handler = handler.with_bot_username(username);
            }
        }
        Err(e) => error!("Failed to look up bot username: {}", e),
    }
    let processor = MessageProcessor::with_defaults(handler);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    info!("Bot started successfully");
    let result = processor
        .run_with_shutdown(telegram_client::subscribe(&client), shutdown)
        .await;

    sessions.clear().await;
    db.close().await;
    info!("Bot stopped");

    result
}
