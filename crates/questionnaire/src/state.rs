//! Conversation states.

use serde::{Deserialize, Serialize};

use crate::choice::Question;

/// Where a conversation currently stands.
///
/// The chain is strictly linear: nickname, city, country, the eleven
/// questions in [`Question::ALL`] order, then [`SessionState::Completed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    AwaitingNickname,
    AwaitingCity,
    AwaitingCountry,
    AwaitingAnswer(Question),
    Completed,
}

impl SessionState {
    /// Entry state of every new session.
    pub const INITIAL: SessionState = SessionState::AwaitingNickname;

    /// Total number of states, terminal included.
    pub const COUNT: usize = 3 + Question::COUNT + 1;

    /// The state that follows this one. `Completed` has no successor.
    pub fn next(&self) -> Option<SessionState> {
        match self {
            Self::AwaitingNickname => Some(Self::AwaitingCity),
            Self::AwaitingCity => Some(Self::AwaitingCountry),
            Self::AwaitingCountry => Some(Self::AwaitingAnswer(Question::ALL[0])),
            Self::AwaitingAnswer(question) => Some(
                question
                    .next()
                    .map_or(Self::Completed, Self::AwaitingAnswer),
            ),
            Self::Completed => None,
        }
    }

    /// Position in the chain, starting at 0 for `AwaitingNickname`.
    pub fn position(&self) -> usize {
        match self {
            Self::AwaitingNickname => 0,
            Self::AwaitingCity => 1,
            Self::AwaitingCountry => 2,
            Self::AwaitingAnswer(question) => 3 + question.index(),
            Self::Completed => Self::COUNT - 1,
        }
    }

    /// Whether this state expects free text rather than a choice glyph.
    pub fn is_free_text(&self) -> bool {
        matches!(
            self,
            Self::AwaitingNickname | Self::AwaitingCity | Self::AwaitingCountry
        )
    }

    /// Whether this is the terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}
