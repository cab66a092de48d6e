//! Live session table.
//!
//! Holds at most one [`SessionRecord`] per user and drives it through
//! [`transition`]. The table is created at startup and passed explicitly to
//! whoever handles inbound messages.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::prompts::prompt_for;
use crate::record::{CompletedQuestionnaire, Identity, SessionRecord, UserId};
use crate::state::SessionState;
use crate::transition::{transition, TransitionError};

/// Outcome of feeding one message into a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    /// The input was stored and the session moved on to `state`.
    Advanced {
        state: SessionState,
        prompt: &'static str,
    },
    /// The input was not accepted; the session is unchanged and still in `state`.
    Rejected {
        state: SessionState,
        reason: TransitionError,
    },
    /// The last question was answered. The session has been removed from the table.
    Finished(CompletedQuestionnaire),
}

/// Errors from session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No conversation was begun for this user.
    #[error("no active session for user {0}")]
    NoActiveSession(UserId),

    /// A record disagreed with its own state. The session is dropped.
    #[error("inconsistent session for user {user_id} in state {state:?}")]
    Inconsistent { user_id: UserId, state: SessionState },
}

/// Process-wide map of live sessions, keyed by user id.
#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: Mutex<HashMap<UserId, SessionRecord>>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session for `identity`, discarding any session in progress.
    pub async fn begin(&self, identity: Identity) -> SessionRecord {
        let user_id = identity.user_id;
        let record = SessionRecord::new(identity);

        let previous = self
            .sessions
            .lock()
            .await
            .insert(user_id, record.clone());

        match previous {
            Some(old) => info!(
                "Restarted session for user {} (discarded {} filled fields)",
                user_id,
                old.filled_fields()
            ),
            None => info!("Started session for user {}", user_id),
        }

        record
    }

    /// Feed one message into the user's session, stamping completion with the local time.
    pub async fn submit(&self, user_id: UserId, text: &str) -> Result<StepResult, SessionError> {
        self.submit_at(user_id, text, chrono::Local::now().naive_local())
            .await
    }

    /// Feed one message into the user's session.
    ///
    /// `now` is used as the submission time if this message finishes the
    /// questionnaire.
    pub async fn submit_at(
        &self,
        user_id: UserId,
        text: &str,
        now: NaiveDateTime,
    ) -> Result<StepResult, SessionError> {
        let mut sessions = self.sessions.lock().await;

        let next = {
            let record = sessions
                .get_mut(&user_id)
                .ok_or(SessionError::NoActiveSession(user_id))?;
            let state = record.state;

            let step = match transition(&state, text) {
                Ok(step) => step,
                Err(reason) => {
                    debug!("Rejected input from user {} in {:?}: {}", user_id, state, reason);
                    return Ok(StepResult::Rejected { state, reason });
                }
            };

            if !record.apply(step.effect) {
                sessions.remove(&user_id);
                error!("Slot already filled for user {} in {:?}", user_id, state);
                return Err(SessionError::Inconsistent { user_id, state });
            }
            record.state = step.next;
            step.next
        };

        if let Some(prompt) = prompt_for(next) {
            debug!("User {} advanced to {:?}", user_id, next);
            return Ok(StepResult::Advanced {
                state: next,
                prompt,
            });
        }

        let record = sessions
            .remove(&user_id)
            .ok_or(SessionError::NoActiveSession(user_id))?;
        drop(sessions);

        match record.finish(now) {
            Some(completed) => {
                info!("Questionnaire completed by user {}", user_id);
                Ok(StepResult::Finished(completed))
            }
            None => {
                error!("Completed session for user {} has empty fields", user_id);
                Err(SessionError::Inconsistent { user_id, state: next })
            }
        }
    }

    /// Current state of the user's session, if any.
    pub async fn state(&self, user_id: UserId) -> Option<SessionState> {
        self.sessions.lock().await.get(&user_id).map(|r| r.state)
    }

    /// Copy of the user's live record, if any.
    pub async fn snapshot(&self, user_id: UserId) -> Option<SessionRecord> {
        self.sessions.lock().await.get(&user_id).cloned()
    }

    /// Drop the user's session. Returns whether one existed.
    pub async fn discard(&self, user_id: UserId) -> bool {
        self.sessions.lock().await.remove(&user_id).is_some()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }

    /// Drop every live session (used at shutdown).
    pub async fn clear(&self) {
        let mut sessions = self.sessions.lock().await;
        if !sessions.is_empty() {
            info!("Dropping {} unfinished sessions", sessions.len());
        }
        sessions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::{AnswerChoice, Question};
    use crate::prompts;

    fn identity(user_id: UserId) -> Identity {
        Identity::new(user_id, "Layla", "Haddad")
    }

    fn now() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(9, 26, 53)
            .unwrap()
    }

    async fn answer_profile(table: &SessionTable, user_id: UserId) {
        for text in ["Lulu", "Amman", "Jordan"] {
            table.submit_at(user_id, text, now()).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_submit_without_begin() {
        let table = SessionTable::new();
        let result = table.submit(42, "hello").await;
        assert_eq!(result, Err(SessionError::NoActiveSession(42)));
        assert!(table.is_empty().await);
    }

    #[tokio::test]
    async fn test_begin_sets_initial_state() {
        let table = SessionTable::new();
        let record = table.begin(identity(1)).await;
        assert_eq!(record.state, SessionState::AwaitingNickname);
        assert_eq!(table.state(1).await, Some(SessionState::AwaitingNickname));
    }

    #[tokio::test]
    async fn test_profile_fields_advance() {
        let table = SessionTable::new();
        table.begin(identity(1)).await;

        let step = table.submit_at(1, "Lulu", now()).await.unwrap();
        assert_eq!(
            step,
            StepResult::Advanced {
                state: SessionState::AwaitingCity,
                prompt: prompts::prompt_for(SessionState::AwaitingCity).unwrap(),
            }
        );
        table.submit_at(1, "Amman", now()).await.unwrap();
        let step = table.submit_at(1, "Jordan", now()).await.unwrap();
        assert!(matches!(
            step,
            StepResult::Advanced {
                state: SessionState::AwaitingAnswer(Question::ProblemSolving),
                ..
            }
        ));

        let record = table.snapshot(1).await.unwrap();
        assert_eq!(record.nickname.as_deref(), Some("Lulu"));
        assert_eq!(record.city.as_deref(), Some("Amman"));
        assert_eq!(record.country.as_deref(), Some("Jordan"));
    }

    #[tokio::test]
    async fn test_invalid_choice_leaves_session_unchanged() {
        let table = SessionTable::new();
        table.begin(identity(1)).await;
        answer_profile(&table, 1).await;
        let before = table.snapshot(1).await.unwrap();

        let step = table.submit_at(1, "a", now()).await.unwrap();
        assert_eq!(
            step,
            StepResult::Rejected {
                state: SessionState::AwaitingAnswer(Question::ProblemSolving),
                reason: TransitionError::InvalidChoice(Question::ProblemSolving),
            }
        );
        assert_eq!(table.snapshot(1).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_full_run_finishes_and_clears() {
        let table = SessionTable::new();
        table.begin(identity(9).with_username("layla_h")).await;
        answer_profile(&table, 9).await;

        let glyphs = ["أ", "ب", "ج", "أ", "ب", "ج", "أ", "ب", "ج", "أ"];
        for glyph in glyphs {
            let step = table.submit_at(9, glyph, now()).await.unwrap();
            assert!(matches!(step, StepResult::Advanced { .. }));
        }

        let step = table.submit_at(9, "ب", now()).await.unwrap();
        let completed = match step {
            StepResult::Finished(completed) => completed,
            other => panic!("expected Finished, got {:?}", other),
        };

        assert_eq!(completed.user_id(), 9);
        assert_eq!(completed.nickname, "Lulu");
        assert_eq!(completed.answer(Question::ProblemSolving), AnswerChoice::A);
        assert_eq!(completed.answer(Question::DailyJudgment), AnswerChoice::A);
        assert_eq!(completed.answer(Question::ToughSituations), AnswerChoice::B);
        assert_eq!(completed.submission_date(), "2025-03-14 09:26:53");
        assert_eq!(completed.identity.username.as_deref(), Some("layla_h"));

        assert!(table.is_empty().await);
        assert_eq!(
            table.submit(9, "أ").await,
            Err(SessionError::NoActiveSession(9))
        );
    }

    #[tokio::test]
    async fn test_begin_discards_partial_record() {
        let table = SessionTable::new();
        table.begin(identity(3)).await;
        table.submit_at(3, "OldNick", now()).await.unwrap();
        table.submit_at(3, "OldCity", now()).await.unwrap();

        table.begin(identity(3)).await;
        let record = table.snapshot(3).await.unwrap();
        assert_eq!(record.state, SessionState::AwaitingNickname);
        assert_eq!(record.nickname, None);
        assert_eq!(record.city, None);
    }

    #[tokio::test]
    async fn test_restart_mid_questions_keeps_only_new_answers() {
        let table = SessionTable::new();
        table.begin(identity(4)).await;
        table.submit_at(4, "OldNick", now()).await.unwrap();
        table.submit_at(4, "OldCity", now()).await.unwrap();
        table.submit_at(4, "OldCountry", now()).await.unwrap();
        for _ in 0..5 {
            table.submit_at(4, "أ", now()).await.unwrap();
        }

        table.begin(identity(4)).await;
        for text in ["NewNick", "NewCity", "NewCountry"] {
            table.submit_at(4, text, now()).await.unwrap();
        }
        let mut finished = None;
        for _ in Question::ALL {
            if let StepResult::Finished(done) = table.submit_at(4, "ج", now()).await.unwrap() {
                finished = Some(done);
            }
        }

        let completed = finished.expect("second run should finish");
        assert_eq!(completed.nickname, "NewNick");
        assert_eq!(completed.city, "NewCity");
        assert_eq!(completed.country, "NewCountry");
        assert_eq!(completed.answers, [AnswerChoice::C; Question::COUNT]);
        assert!(table.is_empty().await);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let table = SessionTable::new();
        table.begin(identity(1)).await;
        table.begin(identity(2)).await;
        table.submit_at(1, "One", now()).await.unwrap();

        assert_eq!(table.state(1).await, Some(SessionState::AwaitingCity));
        assert_eq!(table.state(2).await, Some(SessionState::AwaitingNickname));
        assert_eq!(table.len().await, 2);

        assert!(table.discard(1).await);
        assert!(!table.discard(1).await);
        table.clear().await;
        assert!(table.is_empty().await);
    }
}
