//! In-memory messenger and store used by the handler and processor tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use database::DatabaseError;
use questionnaire::CompletedQuestionnaire;
use telegram_client::TelegramError;

use crate::error::HandlerError;
use crate::sender::Messenger;
use crate::store::ResultStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub chat_id: i64,
    pub text: String,
    pub html: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MockMessenger {
    sent: Arc<Mutex<Vec<Sent>>>,
    fail_html: bool,
}

impl MockMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A messenger whose HTML sends (reports) always fail.
    pub fn failing_html() -> Self {
        Self {
            fail_html: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts_to(&self, chat_id: i64) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|s| s.chat_id == chat_id)
            .map(|s| s.text)
            .collect()
    }

    pub fn last_text_to(&self, chat_id: i64) -> Option<String> {
        self.texts_to(chat_id).pop()
    }
}

#[async_trait]
impl Messenger for MockMessenger {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), HandlerError> {
        self.sent.lock().unwrap().push(Sent {
            chat_id,
            text: text.to_string(),
            html: false,
        });
        Ok(())
    }

    async fn send_html(&self, chat_id: i64, html: &str) -> Result<(), HandlerError> {
        if self.fail_html {
            return Err(TelegramError::Api {
                code: 400,
                description: "Bad Request: chat not found".to_string(),
            }
            .into());
        }
        self.sent.lock().unwrap().push(Sent {
            chat_id,
            text: html.to_string(),
            html: true,
        });
        Ok(())
    }

    async fn register_commands(&self, _commands: &[(&str, &str)]) -> Result<(), HandlerError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockStore {
    saved: Arc<Mutex<Vec<CompletedQuestionnaire>>>,
    fail: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn saved(&self) -> Vec<CompletedQuestionnaire> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResultStore for MockStore {
    async fn upsert(&self, record: &CompletedQuestionnaire) -> Result<(), HandlerError> {
        if self.fail {
            return Err(DatabaseError::NotFound {
                entity: "results",
                id: record.user_id().to_string(),
            }
            .into());
        }
        let mut saved = self.saved.lock().unwrap();
        saved.retain(|r| r.user_id() != record.user_id());
        saved.push(record.clone());
        Ok(())
    }
}

/// Answers that classify as ENTJ.
pub const ENTJ_ANSWERS: [&str; 11] = ["أ", "أ", "أ", "أ", "ب", "أ", "ج", "أ", "ب", "أ", "أ"];

/// Every message of a full questionnaire run after `/test`.
pub fn full_run() -> Vec<&'static str> {
    let mut texts = vec!["Sam", "Rabat", "Morocco"];
    texts.extend(ENTJ_ANSWERS);
    texts
}
