//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One finished questionnaire, as stored in the `results` table.
///
/// Answers are stored as the glyph the user sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct QuestionnaireResult {
    /// Messenger user id (primary key).
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Nickname the user gave in the first question.
    pub username: String,
    pub city: String,
    pub country: String,
    pub problem_solving: String,
    pub creativity: String,
    pub decision_making: String,
    pub social_interaction: String,
    pub emotional_state: String,
    pub planning: String,
    pub flexibility: String,
    pub team_loyalty: String,
    pub control_preference: String,
    pub daily_judgment: String,
    pub tough_situations: String,
    /// Submission time, `YYYY-MM-DD HH:MM:SS` local time.
    pub submission_date: String,
}
