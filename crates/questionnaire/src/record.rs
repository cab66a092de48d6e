//! Session records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::choice::{AnswerChoice, Answers, Question};
use crate::prompts::NOT_AVAILABLE;
use crate::state::SessionState;
use crate::transition::Effect;

/// Messenger user id.
pub type UserId = i64;

/// Format used for submission timestamps in storage and reports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Who is answering, as reported by the messenger when the session began.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Messenger handle, used to link the account in the report.
    pub username: Option<String>,
}

impl Identity {
    pub fn new(
        user_id: UserId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            username: None,
        }
    }

    /// Build an identity from optional messenger fields.
    ///
    /// Missing or empty names become [`NOT_AVAILABLE`]; an empty username
    /// is treated as absent.
    pub fn from_parts(
        user_id: UserId,
        first_name: Option<String>,
        last_name: Option<String>,
        username: Option<String>,
    ) -> Self {
        fn or_placeholder(value: Option<String>) -> String {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        }

        Self {
            user_id,
            first_name: or_placeholder(first_name),
            last_name: or_placeholder(last_name),
            username: username.filter(|u| !u.is_empty()),
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// The live, partially filled record of one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub identity: Identity,
    pub nickname: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub answers: Answers,
    pub state: SessionState,
    pub submitted_at: Option<NaiveDateTime>,
}

impl SessionRecord {
    /// A fresh record waiting for the nickname.
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            nickname: None,
            city: None,
            country: None,
            answers: Answers::default(),
            state: SessionState::INITIAL,
            submitted_at: None,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.identity.user_id
    }

    /// Apply a transition effect.
    ///
    /// Slots are write-once: returns `false` without changing anything if
    /// the target field is already set.
    pub(crate) fn apply(&mut self, effect: Effect) -> bool {
        fn fill(slot: &mut Option<String>, value: String) -> bool {
            if slot.is_some() {
                return false;
            }
            *slot = Some(value);
            true
        }

        match effect {
            Effect::StoreNickname(text) => fill(&mut self.nickname, text),
            Effect::StoreCity(text) => fill(&mut self.city, text),
            Effect::StoreCountry(text) => fill(&mut self.country, text),
            Effect::StoreAnswer(question, choice) => self.answers.set(question, choice),
        }
    }

    /// Number of the 14 non-identity fields that are filled.
    pub fn filled_fields(&self) -> usize {
        [&self.nickname, &self.city, &self.country]
            .iter()
            .filter(|f| f.is_some())
            .count()
            + self.answers.answered()
    }

    /// Freeze the record, stamping it with `submitted_at`.
    ///
    /// Returns `None` unless the record is in `Completed` with every field set.
    pub(crate) fn finish(mut self, submitted_at: NaiveDateTime) -> Option<CompletedQuestionnaire> {
        if !self.state.is_terminal() {
            return None;
        }
        self.submitted_at.get_or_insert(submitted_at);
        Some(CompletedQuestionnaire {
            answers: self.answers.complete()?,
            nickname: self.nickname?,
            city: self.city?,
            country: self.country?,
            submitted_at: self.submitted_at?,
            identity: self.identity,
        })
    }
}

/// A finished questionnaire: every field present, nothing optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedQuestionnaire {
    pub identity: Identity,
    pub nickname: String,
    pub city: String,
    pub country: String,
    pub answers: [AnswerChoice; Question::COUNT],
    pub submitted_at: NaiveDateTime,
}

impl CompletedQuestionnaire {
    pub fn user_id(&self) -> UserId {
        self.identity.user_id
    }

    /// The answer given to `question`.
    pub fn answer(&self, question: Question) -> AnswerChoice {
        self.answers[question.index()]
    }

    /// Submission time in [`TIMESTAMP_FORMAT`].
    pub fn submission_date(&self) -> String {
        self.submitted_at.format(TIMESTAMP_FORMAT).to_string()
    }
}
