//! Persistence seam for finished questionnaires.

use async_trait::async_trait;
use database::{result, Database, QuestionnaireResult};
use questionnaire::{CompletedQuestionnaire, Question};

use crate::error::HandlerError;

/// Trait for storing finished questionnaires.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Store a result, replacing any earlier result for the same user.
    async fn upsert(&self, record: &CompletedQuestionnaire) -> Result<(), HandlerError>;
}

#[async_trait]
impl ResultStore for Database {
    async fn upsert(&self, record: &CompletedQuestionnaire) -> Result<(), HandlerError> {
        result::upsert_result(self.pool(), &to_row(record)).await?;
        Ok(())
    }
}

/// Flatten a finished questionnaire into a `results` row.
///
/// The `username` column holds the nickname the user typed, not the
/// messenger handle.
pub fn to_row(record: &CompletedQuestionnaire) -> QuestionnaireResult {
    let answer = |question: Question| record.answer(question).glyph().to_string();

    QuestionnaireResult {
        user_id: record.user_id(),
        first_name: record.identity.first_name.clone(),
        last_name: record.identity.last_name.clone(),
        username: record.nickname.clone(),
        city: record.city.clone(),
        country: record.country.clone(),
        problem_solving: answer(Question::ProblemSolving),
        creativity: answer(Question::Creativity),
        decision_making: answer(Question::DecisionMaking),
        social_interaction: answer(Question::SocialInteraction),
        emotional_state: answer(Question::EmotionalState),
        planning: answer(Question::Planning),
        flexibility: answer(Question::Flexibility),
        team_loyalty: answer(Question::TeamLoyalty),
        control_preference: answer(Question::ControlPreference),
        daily_judgment: answer(Question::DailyJudgment),
        tough_situations: answer(Question::ToughSituations),
        submission_date: record.submission_date(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::full_run;
    use questionnaire::{Identity, SessionTable, StepResult};

    async fn completed() -> CompletedQuestionnaire {
        let table = SessionTable::new();
        table
            .begin(Identity::new(77, "Samir", "غير متوفر").with_username("samir_m"))
            .await;
        for text in full_run() {
            if let StepResult::Finished(done) = table.submit(77, text).await.unwrap() {
                return done;
            }
        }
        panic!("run did not finish");
    }

    #[tokio::test]
    async fn test_to_row_uses_nickname_and_glyphs() {
        let record = completed().await;
        let row = to_row(&record);

        assert_eq!(row.user_id, 77);
        assert_eq!(row.username, "Sam");
        assert_eq!(row.city, "Rabat");
        assert_eq!(row.country, "Morocco");
        assert_eq!(row.problem_solving, "أ");
        assert_eq!(row.emotional_state, "ب");
        assert_eq!(row.flexibility, "ج");
        assert_eq!(row.submission_date, record.submission_date());
    }

    #[tokio::test]
    async fn test_database_store_upserts() {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();

        let record = completed().await;
        db.upsert(&record).await.unwrap();
        db.upsert(&record).await.unwrap();

        assert_eq!(result::count_results(db.pool()).await.unwrap(), 1);
        let stored = result::get_result(db.pool(), 77).await.unwrap();
        assert_eq!(stored, to_row(&record));
    }
}
