//! Test content repository that is never reachable.

use std::collections::HashSet;

use async_trait::async_trait;
use lexquest_core::catalog::{Level, Outcome, Question, Scenario, ScenarioStep};
use lexquest_core::content::ContentRepository;
use lexquest_core::error::DomainError;
use lexquest_core::ids::{LevelId, QuestionId, ScenarioId};

/// A content repository that always returns a collaborator error.
#[derive(Debug)]
pub struct FailingContentRepository;

fn unavailable() -> DomainError {
    DomainError::CollaboratorUnavailable("content repository: connection refused".into())
}

#[async_trait]
impl ContentRepository for FailingContentRepository {
    async fn get_level(&self, _level_id: LevelId) -> Result<Option<Level>, DomainError> {
        Err(unavailable())
    }

    async fn list_levels(&self) -> Result<Vec<Level>, DomainError> {
        Err(unavailable())
    }

    async fn list_questions(&self, _level_id: LevelId) -> Result<Vec<Question>, DomainError> {
        Err(unavailable())
    }

    async fn list_duel_questions(
        &self,
        _excluding: &HashSet<QuestionId>,
    ) -> Result<Vec<Question>, DomainError> {
        Err(unavailable())
    }

    async fn get_duel_question(
        &self,
        _question_id: QuestionId,
    ) -> Result<Option<Question>, DomainError> {
        Err(unavailable())
    }

    async fn count_duel_questions(&self) -> Result<u32, DomainError> {
        Err(unavailable())
    }

    async fn get_scenario(&self, _scenario_id: ScenarioId) -> Result<Option<Scenario>, DomainError> {
        Err(unavailable())
    }

    async fn list_scenarios(&self) -> Result<Vec<Scenario>, DomainError> {
        Err(unavailable())
    }

    async fn get_scenario_step(
        &self,
        _scenario_id: ScenarioId,
        _step_number: u32,
    ) -> Result<Option<ScenarioStep>, DomainError> {
        Err(unavailable())
    }

    async fn get_outcome(&self, _scenario_id: ScenarioId) -> Result<Option<Outcome>, DomainError> {
        Err(unavailable())
    }
}
