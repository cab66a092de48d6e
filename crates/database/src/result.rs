//! Questionnaire result storage.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::QuestionnaireResult;

const SELECT_COLUMNS: &str = r#"
    SELECT user_id, first_name, last_name, username, city, country,
           problem_solving, creativity, decision_making, social_interaction,
           emotional_state, planning, flexibility, team_loyalty,
           control_preference, daily_judgment, tough_situations, submission_date
    FROM results
"#;

/// Insert a result, replacing any earlier result for the same user.
pub async fn upsert_result(pool: &SqlitePool, result: &QuestionnaireResult) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR REPLACE INTO results (
            user_id, first_name, last_name, username, city, country,
            problem_solving, creativity, decision_making, social_interaction,
            emotional_state, planning, flexibility, team_loyalty,
            control_preference, daily_judgment, tough_situations, submission_date
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(result.user_id)
    .bind(&result.first_name)
    .bind(&result.last_name)
    .bind(&result.username)
    .bind(&result.city)
    .bind(&result.country)
    .bind(&result.problem_solving)
    .bind(&result.creativity)
    .bind(&result.decision_making)
    .bind(&result.social_interaction)
    .bind(&result.emotional_state)
    .bind(&result.planning)
    .bind(&result.flexibility)
    .bind(&result.team_loyalty)
    .bind(&result.control_preference)
    .bind(&result.daily_judgment)
    .bind(&result.tough_situations)
    .bind(&result.submission_date)
    .execute(pool)
    .await?;

    tracing::info!("Data saved for user {}", result.user_id);
    Ok(())
}

/// Get the stored result for a user, if any.
pub async fn find_result(pool: &SqlitePool, user_id: i64) -> Result<Option<QuestionnaireResult>> {
    let query = format!("{} WHERE user_id = ?", SELECT_COLUMNS);
    let record = sqlx::query_as::<_, QuestionnaireResult>(&query)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(record)
}

/// Get the stored result for a user.
pub async fn get_result(pool: &SqlitePool, user_id: i64) -> Result<QuestionnaireResult> {
    find_result(pool, user_id)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "QuestionnaireResult",
            id: user_id.to_string(),
        })
}

/// List all results, most recent submission first.
pub async fn list_results(pool: &SqlitePool) -> Result<Vec<QuestionnaireResult>> {
    let query = format!("{} ORDER BY submission_date DESC, user_id", SELECT_COLUMNS);
    let results = sqlx::query_as::<_, QuestionnaireResult>(&query)
        .fetch_all(pool)
        .await?;

    Ok(results)
}

/// Count stored results.
pub async fn count_results(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM results
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Delete the result for a user.
pub async fn delete_result(pool: &SqlitePool, user_id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM results
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "QuestionnaireResult",
            id: user_id.to_string(),
        });
    }

    Ok(())
}
