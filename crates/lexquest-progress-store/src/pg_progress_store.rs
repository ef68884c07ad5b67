//! `PostgreSQL` implementation of the `ProgressStore` trait.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use lexquest_core::error::DomainError;
use lexquest_core::ids::{LevelId, QuestionId, ScenarioId, UserId};
use lexquest_core::progress::{
    DuelQuestionFact, LevelCompletionFact, ProgressStore, ScenarioCompletionFact,
};

/// PostgreSQL-backed progress store.
#[derive(Debug, Clone)]
pub struct PgProgressStore {
    pool: PgPool,
}

impl PgProgressStore {
    /// Creates a new `PgProgressStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unavailable(err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, "progress store query failed");
    DomainError::CollaboratorUnavailable(format!("progress store: {err}"))
}

fn to_db_int(value: u32, field: &str) -> Result<i32, DomainError> {
    i32::try_from(value).map_err(|_| DomainError::Validation(format!("{field} out of range: {value}")))
}

fn from_db_int(value: i32) -> u32 {
    u32::try_from(value).unwrap_or_default()
}

type LevelRow = (Uuid, i64, i32, i32, bool, DateTime<Utc>);

fn level_fact(row: LevelRow) -> LevelCompletionFact {
    let (user_id, level_id, level_number, score, passed, updated_at) = row;
    LevelCompletionFact {
        user_id: UserId(user_id),
        level_id: LevelId(level_id),
        level_number: from_db_int(level_number),
        score: from_db_int(score),
        passed,
        updated_at,
    }
}

#[async_trait]
impl ProgressStore for PgProgressStore {
    async fn upsert_level_completion(&self, fact: LevelCompletionFact) -> Result<(), DomainError> {
        sqlx::query(
            r"
            INSERT INTO level_progress (user_id, level_id, level_number, score, passed, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, level_id) DO UPDATE
            SET level_number = EXCLUDED.level_number,
                score = EXCLUDED.score,
                passed = EXCLUDED.passed,
                updated_at = EXCLUDED.updated_at
            ",
        )
        .bind(fact.user_id.0)
        .bind(fact.level_id.0)
        .bind(to_db_int(fact.level_number, "level_number")?)
        .bind(to_db_int(fact.score, "score")?)
        .bind(fact.passed)
        .bind(fact.updated_at)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;
        Ok(())
    }

    async fn upsert_scenario_completion(
        &self,
        fact: ScenarioCompletionFact,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r"
            INSERT INTO scenario_progress (user_id, scenario_id, completed, completed_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, scenario_id) DO UPDATE
            SET completed = EXCLUDED.completed,
                completed_at = EXCLUDED.completed_at
            ",
        )
        .bind(fact.user_id.0)
        .bind(fact.scenario_id.0)
        .bind(fact.completed)
        .bind(fact.completed_at)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;
        Ok(())
    }

    async fn record_duel_correct(&self, fact: DuelQuestionFact) -> Result<(), DomainError> {
        sqlx::query(
            r"
            INSERT INTO duel_progress (user_id, question_id, is_correct, answered_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, question_id) DO UPDATE
            SET is_correct = EXCLUDED.is_correct,
                answered_at = EXCLUDED.answered_at
            ",
        )
        .bind(fact.user_id.0)
        .bind(fact.question_id.0)
        .bind(fact.is_correct)
        .bind(fact.answered_at)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;
        Ok(())
    }

    async fn count_duel_facts_for(&self, user_id: UserId) -> Result<u32, DomainError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM duel_progress WHERE user_id = $1")
            .bind(user_id.0)
            .fetch_one(&self.pool)
            .await
            .map_err(unavailable)?;
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn list_duel_facts(&self, user_id: UserId) -> Result<Vec<DuelQuestionFact>, DomainError> {
        let rows: Vec<(i64, bool, DateTime<Utc>)> = sqlx::query_as(
            r"
            SELECT question_id, is_correct, answered_at
            FROM duel_progress
            WHERE user_id = $1
            ORDER BY question_id
            ",
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(rows
            .into_iter()
            .map(|(question_id, is_correct, answered_at)| DuelQuestionFact {
                user_id,
                question_id: QuestionId(question_id),
                is_correct,
                answered_at,
            })
            .collect())
    }

    async fn duel_correct_question_ids(
        &self,
        user_id: UserId,
    ) -> Result<HashSet<QuestionId>, DomainError> {
        let rows: Vec<(i64,)> = sqlx::query_as(
            "SELECT question_id FROM duel_progress WHERE user_id = $1 AND is_correct",
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?;
        Ok(rows.into_iter().map(|(id,)| QuestionId(id)).collect())
    }

    async fn reset_duel_progress(&self, user_id: UserId) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM duel_progress WHERE user_id = $1")
            .bind(user_id.0)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        Ok(result.rows_affected())
    }

    async fn level_completions(
        &self,
        user_id: UserId,
    ) -> Result<Vec<LevelCompletionFact>, DomainError> {
        let rows: Vec<LevelRow> = sqlx::query_as(
            r"
            SELECT user_id, level_id, level_number, score, passed, updated_at
            FROM level_progress
            WHERE user_id = $1
            ORDER BY level_number
            ",
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?;
        Ok(rows.into_iter().map(level_fact).collect())
    }

    async fn scenario_completions(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ScenarioCompletionFact>, DomainError> {
        let rows: Vec<(i64, bool, DateTime<Utc>)> = sqlx::query_as(
            r"
            SELECT scenario_id, completed, completed_at
            FROM scenario_progress
            WHERE user_id = $1
            ORDER BY scenario_id
            ",
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(rows
            .into_iter()
            .map(|(scenario_id, completed, completed_at)| ScenarioCompletionFact {
                user_id,
                scenario_id: ScenarioId(scenario_id),
                completed,
                completed_at,
            })
            .collect())
    }

    async fn is_level_unlocked(
        &self,
        user_id: UserId,
        level_number: u32,
    ) -> Result<bool, DomainError> {
        if level_number <= 1 {
            return Ok(true);
        }
        let (unlocked,): (bool,) = sqlx::query_as(
            r"
            SELECT EXISTS (
                SELECT 1 FROM level_progress
                WHERE user_id = $1 AND level_number = $2 AND passed
            )
            ",
        )
        .bind(user_id.0)
        .bind(to_db_int(level_number - 1, "level_number")?)
        .fetch_one(&self.pool)
        .await
        .map_err(unavailable)?;
        Ok(unlocked)
    }
}
