//! Conversation handler: turns inbound messages into session operations and replies.

use std::sync::Arc;

use questionnaire::prompts::{
    prompt_for, INVALID_CHOICE, PROCESSING_FAILED, THANK_YOU, USAGE_HELP, WELCOME,
};
use questionnaire::{
    classify, format_report, CompletedQuestionnaire, SessionError, SessionState, SessionTable,
    StepResult, TransitionError,
};
use tracing::{debug, error, info, warn};

use crate::command::Command;
use crate::error::HandlerError;
use crate::message::IncomingMessage;
use crate::sender::Messenger;
use crate::store::ResultStore;

/// What handling one message did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `/start` answered with the welcome text.
    Welcomed,
    /// `/test` began a new session.
    Started,
    /// An answer was accepted and the next prompt sent.
    Advanced(SessionState),
    /// An answer was refused; the session did not move.
    Rejected(TransitionError),
    /// The user has no session; usage help was sent.
    NoSession,
    /// The last answer was accepted and the session closed.
    Completed {
        persisted: bool,
        report_sent: bool,
    },
}

/// Handles messages against the shared session table.
pub struct QuestionnaireHandler<M: Messenger, S: ResultStore> {
    sessions: Arc<SessionTable>,
    messenger: M,
    store: S,
    operator_chat_id: i64,
    bot_username: Option<String>,
}

impl<M: Messenger, S: ResultStore> QuestionnaireHandler<M, S> {
    pub fn new(sessions: Arc<SessionTable>, messenger: M, store: S, operator_chat_id: i64) -> Self {
        Self {
            sessions,
            messenger,
            store,
            operator_chat_id,
            bot_username: None,
        }
    }

    /// Only accept `/command@name` suffixes naming this bot.
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    pub fn sessions(&self) -> &Arc<SessionTable> {
        &self.sessions
    }

    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle one inbound text message.
    pub async fn handle(&self, msg: &IncomingMessage) -> Result<Outcome, HandlerError> {
        let command = match Command::parse_for(&msg.text, self.bot_username.as_deref()) {
            Some(command) => command,
            None => return self.handle_answer(msg).await,
        };
        info!("Received /{} from user {}", command.name(), msg.user_id);

        match command {
            Command::Start => {
                self.messenger.send_text(msg.chat_id, WELCOME).await?;
                Ok(Outcome::Welcomed)
            }
            Command::Test => {
                let record = self.sessions.begin(msg.identity()).await;
                if let Some(prompt) = prompt_for(record.state) {
                    self.messenger.send_text(msg.chat_id, prompt).await?;
                }
                Ok(Outcome::Started)
            }
        }
    }

    async fn handle_answer(&self, msg: &IncomingMessage) -> Result<Outcome, HandlerError> {
        let step = match self.sessions.submit(msg.user_id, &msg.text).await {
            Ok(step) => step,
            Err(SessionError::NoActiveSession(_)) => {
                debug!("No session for user {}: {:?}", msg.user_id, msg.text);
                self.messenger.send_text(msg.chat_id, USAGE_HELP).await?;
                return Ok(Outcome::NoSession);
            }
            Err(e) => {
                error!("Session error for user {}: {}", msg.user_id, e);
                self.messenger
                    .send_text(msg.chat_id, PROCESSING_FAILED)
                    .await?;
                return Err(e.into());
            }
        };

        match step {
            StepResult::Advanced { state, prompt } => {
                self.messenger.send_text(msg.chat_id, prompt).await?;
                Ok(Outcome::Advanced(state))
            }
            StepResult::Rejected { state, reason } => {
                let reply = match reason {
                    TransitionError::InvalidChoice(_) => INVALID_CHOICE,
                    TransitionError::EmptyText => prompt_for(state).unwrap_or(USAGE_HELP),
                    TransitionError::AlreadyCompleted => USAGE_HELP,
                };
                self.messenger.send_text(msg.chat_id, reply).await?;
                Ok(Outcome::Rejected(reason))
            }
            StepResult::Finished(record) => Ok(self.complete(msg.chat_id, record).await),
        }
    }

    /// Persist a finished questionnaire, thank the user and report to the operator.
    ///
    /// The report is only sent once the result is stored. Failures are logged
    /// here and never reach the receive loop.
    async fn complete(&self, chat_id: i64, record: CompletedQuestionnaire) -> Outcome {
        let user_id = record.user_id();

        if let Err(e) = self.store.upsert(&record).await {
            error!("Error saving results for user {}: {}", user_id, e);
            if let Err(e) = self.messenger.send_text(chat_id, PROCESSING_FAILED).await {
                warn!("Failed to notify user {} of the failure: {}", user_id, e);
            }
            return Outcome::Completed {
                persisted: false,
                report_sent: false,
            };
        }

        if let Err(e) = self.messenger.send_text(chat_id, THANK_YOU).await {
            warn!("Failed to thank user {}: {}", user_id, e);
        }

        let profile = classify(&record);
        let report = format_report(&record, &profile);
        let report_sent = match self.messenger.send_html(self.operator_chat_id, &report).await {
            Ok(()) => {
                info!(
                    "Report for user {} ({}) sent to operator {}",
                    user_id,
                    profile.type_code(),
                    self.operator_chat_id
                );
                true
            }
            Err(e) => {
                error!("Failed to send report for user {}: {}", user_id, e);
                false
            }
        };

        Outcome::Completed {
            persisted: true,
            report_sent,
        }
    }
}
