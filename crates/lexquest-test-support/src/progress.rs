//! Test progress stores — `ProgressStore` implementations for tests.

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use lexquest_core::error::DomainError;
use lexquest_core::ids::{LevelId, QuestionId, ScenarioId, UserId};
use lexquest_core::progress::{
    DuelQuestionFact, LevelCompletionFact, ProgressStore, ScenarioCompletionFact,
    level_unlocked_by,
};

#[derive(Debug, Default)]
struct Facts {
    levels: BTreeMap<(UserId, LevelId), LevelCompletionFact>,
    scenarios: BTreeMap<(UserId, ScenarioId), ScenarioCompletionFact>,
    duel: BTreeMap<(UserId, QuestionId), DuelQuestionFact>,
    level_writes: usize,
    scenario_writes: usize,
    duel_writes: usize,
}

/// A progress store that keeps facts in memory with upsert semantics and
/// counts every write, so tests can assert both the stored state and how
/// many times a completion point was reached.
#[derive(Debug, Default)]
pub struct InMemoryProgressStore {
    facts: Mutex<Facts>,
}

impl InMemoryProgressStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of level upserts received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn level_writes(&self) -> usize {
        self.facts.lock().unwrap().level_writes
    }

    /// Number of scenario upserts received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn scenario_writes(&self) -> usize {
        self.facts.lock().unwrap().scenario_writes
    }

    /// Number of duel-question writes received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn duel_writes(&self) -> usize {
        self.facts.lock().unwrap().duel_writes
    }

    /// Snapshot of every stored scenario fact.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn all_scenario_facts(&self) -> Vec<ScenarioCompletionFact> {
        self.facts.lock().unwrap().scenarios.values().cloned().collect()
    }
}

#[async_trait]
impl ProgressStore for InMemoryProgressStore {
    async fn upsert_level_completion(&self, fact: LevelCompletionFact) -> Result<(), DomainError> {
        let mut facts = self.facts.lock().unwrap();
        facts.level_writes += 1;
        facts.levels.insert((fact.user_id, fact.level_id), fact);
        Ok(())
    }

    async fn upsert_scenario_completion(
        &self,
        fact: ScenarioCompletionFact,
    ) -> Result<(), DomainError> {
        let mut facts = self.facts.lock().unwrap();
        facts.scenario_writes += 1;
        facts.scenarios.insert((fact.user_id, fact.scenario_id), fact);
        Ok(())
    }

    async fn record_duel_correct(&self, fact: DuelQuestionFact) -> Result<(), DomainError> {
        let mut facts = self.facts.lock().unwrap();
        facts.duel_writes += 1;
        facts.duel.insert((fact.user_id, fact.question_id), fact);
        Ok(())
    }

    async fn count_duel_facts_for(&self, user_id: UserId) -> Result<u32, DomainError> {
        let count = self
            .facts
            .lock()
            .unwrap()
            .duel
            .keys()
            .filter(|(user, _)| *user == user_id)
            .count();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn list_duel_facts(&self, user_id: UserId) -> Result<Vec<DuelQuestionFact>, DomainError> {
        Ok(self
            .facts
            .lock()
            .unwrap()
            .duel
            .values()
            .filter(|fact| fact.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn duel_correct_question_ids(
        &self,
        user_id: UserId,
    ) -> Result<HashSet<QuestionId>, DomainError> {
        Ok(self
            .facts
            .lock()
            .unwrap()
            .duel
            .values()
            .filter(|fact| fact.user_id == user_id && fact.is_correct)
            .map(|fact| fact.question_id)
            .collect())
    }

    async fn reset_duel_progress(&self, user_id: UserId) -> Result<u64, DomainError> {
        let mut facts = self.facts.lock().unwrap();
        let before = facts.duel.len();
        facts.duel.retain(|(user, _), _| *user != user_id);
        Ok((before - facts.duel.len()) as u64)
    }

    async fn level_completions(
        &self,
        user_id: UserId,
    ) -> Result<Vec<LevelCompletionFact>, DomainError> {
        Ok(self
            .facts
            .lock()
            .unwrap()
            .levels
            .values()
            .filter(|fact| fact.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn scenario_completions(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ScenarioCompletionFact>, DomainError> {
        Ok(self
            .facts
            .lock()
            .unwrap()
            .scenarios
            .values()
            .filter(|fact| fact.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn is_level_unlocked(
        &self,
        user_id: UserId,
        level_number: u32,
    ) -> Result<bool, DomainError> {
        let facts = self.level_completions(user_id).await?;
        Ok(level_unlocked_by(&facts, level_number))
    }
}

/// A progress store that always fails as if the database were down. Useful
/// for testing error-handling paths.
#[derive(Debug)]
pub struct FailingProgressStore;

fn unavailable() -> DomainError {
    DomainError::CollaboratorUnavailable("progress store: connection refused".into())
}

#[async_trait]
impl ProgressStore for FailingProgressStore {
    async fn upsert_level_completion(&self, _fact: LevelCompletionFact) -> Result<(), DomainError> {
        Err(unavailable())
    }

    async fn upsert_scenario_completion(
        &self,
        _fact: ScenarioCompletionFact,
    ) -> Result<(), DomainError> {
        Err(unavailable())
    }

    async fn record_duel_correct(&self, _fact: DuelQuestionFact) -> Result<(), DomainError> {
        Err(unavailable())
    }

    async fn count_duel_facts_for(&self, _user_id: UserId) -> Result<u32, DomainError> {
        Err(unavailable())
    }

    async fn list_duel_facts(&self, _user_id: UserId) -> Result<Vec<DuelQuestionFact>, DomainError> {
        Err(unavailable())
    }

    async fn duel_correct_question_ids(
        &self,
        _user_id: UserId,
    ) -> Result<HashSet<QuestionId>, DomainError> {
        Err(unavailable())
    }

    async fn reset_duel_progress(&self, _user_id: UserId) -> Result<u64, DomainError> {
        Err(unavailable())
    }

    async fn level_completions(
        &self,
        _user_id: UserId,
    ) -> Result<Vec<LevelCompletionFact>, DomainError> {
        Err(unavailable())
    }

    async fn scenario_completions(
        &self,
        _user_id: UserId,
    ) -> Result<Vec<ScenarioCompletionFact>, DomainError> {
        Err(unavailable())
    }

    async fn is_level_unlocked(
        &self,
        _user_id: UserId,
        _level_number: u32,
    ) -> Result<bool, DomainError> {
        Err(unavailable())
    }
}
