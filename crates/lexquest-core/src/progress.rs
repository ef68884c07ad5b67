//! Progress facts and the progress store abstraction.
//!
//! Facts record completed units of work. There is at most one fact per
//! (user, level), (user, scenario) and (user, duel question): every write is
//! an upsert.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{LevelId, QuestionId, ScenarioId, UserId};

/// Latest graded attempt of a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCompletionFact {
    /// The player.
    pub user_id: UserId,
    /// The graded level.
    pub level_id: LevelId,
    /// The level's position in the unlock chain.
    pub level_number: u32,
    /// Percentage score, 0 to 100.
    pub score: u32,
    /// Whether the score met the pass mark.
    pub passed: bool,
    /// When the attempt was graded.
    pub updated_at: DateTime<Utc>,
}

/// A finished scenario playthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioCompletionFact {
    /// The player.
    pub user_id: UserId,
    /// The completed scenario.
    pub scenario_id: ScenarioId,
    /// Always `true` once written.
    pub completed: bool,
    /// When the outcome was reached.
    pub completed_at: DateTime<Utc>,
}

/// A duel question the player has answered correctly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelQuestionFact {
    /// The player.
    pub user_id: UserId,
    /// The answered question.
    pub question_id: QuestionId,
    /// Correctness of the recorded answer.
    pub is_correct: bool,
    /// When the answer was recorded.
    pub answered_at: DateTime<Utc>,
}

/// Durable, idempotent store of progress facts.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Insert or overwrite the level fact for (user, level).
    async fn upsert_level_completion(&self, fact: LevelCompletionFact) -> Result<(), DomainError>;

    /// Insert or overwrite the scenario fact for (user, scenario).
    async fn upsert_scenario_completion(
        &self,
        fact: ScenarioCompletionFact,
    ) -> Result<(), DomainError>;

    /// Insert or overwrite the duel fact for (user, question).
    async fn record_duel_correct(&self, fact: DuelQuestionFact) -> Result<(), DomainError>;

    /// Number of duel facts held for the user.
    async fn count_duel_facts_for(&self, user_id: UserId) -> Result<u32, DomainError>;

    /// Every duel fact held for the user, ordered by question id.
    async fn list_duel_facts(&self, user_id: UserId) -> Result<Vec<DuelQuestionFact>, DomainError>;

    /// Ids of the duel questions the user has answered correctly.
    async fn duel_correct_question_ids(
        &self,
        user_id: UserId,
    ) -> Result<HashSet<QuestionId>, DomainError>;

    /// Delete every duel fact of the user, returning how many were removed.
    async fn reset_duel_progress(&self, user_id: UserId) -> Result<u64, DomainError>;

    /// Every level fact held for the user.
    async fn level_completions(
        &self,
        user_id: UserId,
    ) -> Result<Vec<LevelCompletionFact>, DomainError>;

    /// Every scenario fact held for the user.
    async fn scenario_completions(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ScenarioCompletionFact>, DomainError>;

    /// Level 1 is always unlocked; level N is unlocked once level N-1 has a
    /// passing fact.
    async fn is_level_unlocked(&self, user_id: UserId, level_number: u32)
    -> Result<bool, DomainError>;
}

/// Applies the unlock rule to a user's level facts.
#[must_use]
pub fn level_unlocked_by(facts: &[LevelCompletionFact], level_number: u32) -> bool {
    level_number <= 1
        || facts
            .iter()
            .any(|fact| fact.level_number + 1 == level_number && fact.passed)
}
