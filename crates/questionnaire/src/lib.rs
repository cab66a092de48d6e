//! Conversation core for the personality questionnaire bot.
//!
//! This crate holds everything that decides *what* the bot says, with no
//! transport or storage attached:
//!
//! - [`SessionTable`] - one linear conversation per user, driven by the pure
//!   [`transition`] function
//! - [`classify`] - turns a [`CompletedQuestionnaire`] into a [`PersonalityProfile`]
//! - [`format_report`] - the HTML report forwarded to the operator
//! - [`prompts`] - the fixed texts shown to users
//!
//! # Example
//!
//! ```rust
//! use questionnaire::{classify, Identity, SessionTable, StepResult};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), questionnaire::SessionError> {
//! let table = SessionTable::new();
//! table.begin(Identity::new(1001, "Mona", "Saad")).await;
//!
//! for text in ["Mimi", "Cairo", "Egypt"] {
//!     table.submit(1001, text).await?;
//! }
//! let glyphs = ["أ", "أ", "أ", "أ", "ب", "أ", "ج", "أ", "ب", "أ", "أ"];
//! for glyph in glyphs {
//!     if let StepResult::Finished(done) = table.submit(1001, glyph).await? {
//!         assert_eq!(classify(&done).type_code(), "ENTJ");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod choice;
mod classifier;
pub mod prompts;
mod record;
mod report;
mod session;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use choice::{AnswerChoice, Answers, Question};
pub use classifier::{
    classify, Axis, AxisResult, AxisValue, ControlPreference, CreativityLevel, Loyalty,
    LoyaltyLevel, PersonalityProfile, Resilience,
};
pub use record::{CompletedQuestionnaire, Identity, SessionRecord, UserId, TIMESTAMP_FORMAT};
pub use report::{account_link, escape_html, format_report};
pub use session::{SessionError, SessionTable, StepResult};
pub use state::SessionState;
pub use transition::{transition, Effect, Transition, TransitionError};
