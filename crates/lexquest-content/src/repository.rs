//! In-memory `ContentRepository` over a validated [`Catalog`].

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use lexquest_core::catalog::{Level, Outcome, Question, Scenario, ScenarioStep};
use lexquest_core::content::ContentRepository;
use lexquest_core::error::DomainError;
use lexquest_core::ids::{LevelId, QuestionId, ScenarioId};

use crate::catalog::Catalog;

/// Read-only content repository serving a catalog held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryContentRepository {
    catalog: Arc<Catalog>,
}

impl InMemoryContentRepository {
    /// Wraps a validated catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Returns the catalog fingerprint.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        self.catalog.fingerprint()
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn get_level(&self, level_id: LevelId) -> Result<Option<Level>, DomainError> {
        Ok(self
            .catalog
            .levels
            .iter()
            .find(|level| level.id == level_id)
            .cloned())
    }

    async fn list_levels(&self) -> Result<Vec<Level>, DomainError> {
        Ok(self.catalog.levels.clone())
    }

    async fn list_questions(&self, level_id: LevelId) -> Result<Vec<Question>, DomainError> {
        Ok(self
            .catalog
            .level_questions
            .get(&level_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_duel_questions(
        &self,
        excluding: &HashSet<QuestionId>,
    ) -> Result<Vec<Question>, DomainError> {
        Ok(self
            .catalog
            .duel_questions
            .values()
            .filter(|question| !excluding.contains(&question.id))
            .cloned()
            .collect())
    }

    async fn get_duel_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Option<Question>, DomainError> {
        Ok(self.catalog.duel_questions.get(&question_id).cloned())
    }

    async fn count_duel_questions(&self) -> Result<u32, DomainError> {
        Ok(u32::try_from(self.catalog.duel_questions.len()).unwrap_or(u32::MAX))
    }

    async fn get_scenario(&self, scenario_id: ScenarioId) -> Result<Option<Scenario>, DomainError> {
        Ok(self.catalog.scenarios.get(&scenario_id).cloned())
    }

    async fn list_scenarios(&self) -> Result<Vec<Scenario>, DomainError> {
        Ok(self.catalog.scenarios.values().cloned().collect())
    }

    async fn get_scenario_step(
        &self,
        scenario_id: ScenarioId,
        step_number: u32,
    ) -> Result<Option<ScenarioStep>, DomainError> {
        let Some(index) = step_number.checked_sub(1) else {
            return Ok(None);
        };
        Ok(self
            .catalog
            .steps
            .get(&scenario_id)
            .and_then(|steps| steps.get(index as usize))
            .cloned())
    }

    async fn get_outcome(&self, scenario_id: ScenarioId) -> Result<Option<Outcome>, DomainError> {
        Ok(self.catalog.outcomes.get(&scenario_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipped() -> InMemoryContentRepository {
        let catalog = Catalog::from_yaml_str(include_str!("../../../catalog/catalog.yaml")).unwrap();
        InMemoryContentRepository::new(catalog)
    }

    #[tokio::test]
    async fn test_list_duel_questions_excludes_answered_and_keeps_id_order() {
        let repo = shipped();
        let excluding: HashSet<QuestionId> = [QuestionId(1), QuestionId(3)].into_iter().collect();

        let questions = repo.list_duel_questions(&excluding).await.unwrap();

        let ids: Vec<i64> = questions.iter().map(|q| q.id.0).collect();
        assert_eq!(ids, vec![2, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[tokio::test]
    async fn test_get_scenario_step_returns_none_past_the_last_step() {
        let repo = shipped();

        assert!(repo.get_scenario_step(ScenarioId(1), 2).await.unwrap().is_some());
        assert!(repo.get_scenario_step(ScenarioId(1), 3).await.unwrap().is_none());
        assert!(repo.get_scenario_step(ScenarioId(1), 0).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_rows_are_none_not_errors() {
        let repo = shipped();

        assert!(repo.get_level(LevelId(99)).await.unwrap().is_none());
        assert!(repo.get_scenario(ScenarioId(99)).await.unwrap().is_none());
        assert!(repo.get_outcome(ScenarioId(99)).await.unwrap().is_none());
        assert!(repo.list_questions(LevelId(99)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_levels_is_ordered_by_number() {
        let repo = shipped();

        let levels = repo.list_levels().await.unwrap();

        let numbers: Vec<u32> = levels.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(repo.count_duel_questions().await.unwrap(), 10);
    }
}
