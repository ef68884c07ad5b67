//! Content repository abstraction.
//!
//! Read-only access to levels, questions, the duel pool and scenarios.
//! A missing row is `Ok(None)`; `Err` is reserved for an unreachable backend.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::catalog::{Level, Outcome, Question, Scenario, ScenarioStep};
use crate::error::DomainError;
use crate::ids::{LevelId, QuestionId, ScenarioId};

/// Repository trait for reading the quiz catalog.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Load a level by id.
    async fn get_level(&self, level_id: LevelId) -> Result<Option<Level>, DomainError>;

    /// List every level ordered by level number.
    async fn list_levels(&self) -> Result<Vec<Level>, DomainError>;

    /// List the questions of a level in authoring order.
    async fn list_questions(&self, level_id: LevelId) -> Result<Vec<Question>, DomainError>;

    /// List duel questions whose ids are not in `excluding`, ordered by id.
    async fn list_duel_questions(
        &self,
        excluding: &HashSet<QuestionId>,
    ) -> Result<Vec<Question>, DomainError>;

    /// Load a single duel question by id.
    async fn get_duel_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Option<Question>, DomainError>;

    /// Total number of duel questions in the catalog.
    async fn count_duel_questions(&self) -> Result<u32, DomainError>;

    /// Load a scenario by id.
    async fn get_scenario(&self, scenario_id: ScenarioId) -> Result<Option<Scenario>, DomainError>;

    /// List every scenario ordered by id.
    async fn list_scenarios(&self) -> Result<Vec<Scenario>, DomainError>;

    /// Load one step of a scenario; `Ok(None)` once past the last step.
    async fn get_scenario_step(
        &self,
        scenario_id: ScenarioId,
        step_number: u32,
    ) -> Result<Option<ScenarioStep>, DomainError>;

    /// Load the terminal outcome of a scenario.
    async fn get_outcome(&self, scenario_id: ScenarioId) -> Result<Option<Outcome>, DomainError>;
}
