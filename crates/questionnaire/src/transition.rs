//! Pure state transition function.
//!
//! Given the current state and the raw text of one inbound message, decide
//! the next state and which record field the message fills. Nothing here
//! touches a session record; [`crate::session`] applies the effect.

use thiserror::Error;

use crate::choice::{AnswerChoice, Question};
use crate::state::SessionState;

/// The record update a transition asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StoreNickname(String),
    StoreCity(String),
    StoreCountry(String),
    StoreAnswer(Question, AnswerChoice),
}

/// Result of a successful transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: SessionState,
    pub effect: Effect,
}

/// Why an input was not accepted in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// A question state got something other than one of the three glyphs.
    #[error("invalid choice for question {}", .0.number())]
    InvalidChoice(Question),

    /// A free-text state got an empty message.
    #[error("empty answer")]
    EmptyText,

    /// The session already finished; there is nothing left to answer.
    #[error("session already completed")]
    AlreadyCompleted,
}

/// Advance `state` with `input`.
///
/// Free-text states accept any non-empty text verbatim. Question states
/// accept only an exact choice glyph. On error the caller must leave the
/// session untouched.
pub fn transition(state: &SessionState, input: &str) -> Result<Transition, TransitionError> {
    let effect = match state {
        SessionState::Completed => return Err(TransitionError::AlreadyCompleted),
        SessionState::AwaitingNickname
        | SessionState::AwaitingCity
        | SessionState::AwaitingCountry
            if input.is_empty() =>
        {
            return Err(TransitionError::EmptyText)
        }
        SessionState::AwaitingNickname => Effect::StoreNickname(input.to_string()),
        SessionState::AwaitingCity => Effect::StoreCity(input.to_string()),
        SessionState::AwaitingCountry => Effect::StoreCountry(input.to_string()),
        SessionState::AwaitingAnswer(question) => {
            let choice =
                AnswerChoice::parse(input).ok_or(TransitionError::InvalidChoice(*question))?;
            Effect::StoreAnswer(*question, choice)
        }
    };

    let next = state.next().ok_or(TransitionError::AlreadyCompleted)?;
    Ok(Transition { next, effect })
}
