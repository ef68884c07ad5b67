//! Query handlers for the scenario context.

use lexquest_core::catalog::{Outcome, Scenario, ScenarioStep};
use lexquest_core::content::ContentRepository;
use lexquest_core::error::DomainError;
use lexquest_core::ids::{ScenarioId, UserId};
use lexquest_core::progress::ProgressStore;
use serde::Serialize;

/// A scenario on the scenario list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioSummary {
    /// The scenario.
    pub scenario: Scenario,
    /// Whether the player has reached its outcome.
    pub completed: bool,
}

/// Result of looking up a step by number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepLookup {
    /// The step exists.
    Step(ScenarioStep),
    /// The chain is shorter; the caller should show the outcome.
    NoFurtherStep,
}

/// Lists every scenario with the player's completion flag.
///
/// # Errors
///
/// Returns `DomainError::CollaboratorUnavailable` if a collaborator fails.
pub async fn list_scenarios(
    user_id: UserId,
    content: &dyn ContentRepository,
    progress: &dyn ProgressStore,
) -> Result<Vec<ScenarioSummary>, DomainError> {
    let scenarios = content.list_scenarios().await?;
    let facts = progress.scenario_completions(user_id).await?;
    Ok(scenarios
        .into_iter()
        .map(|scenario| ScenarioSummary {
            completed: facts
                .iter()
                .any(|f| f.scenario_id == scenario.id && f.completed),
            scenario,
        })
        .collect())
}

/// Looks up step `step_number` of a scenario.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown scenario and
/// `DomainError::CollaboratorUnavailable` if the content lookup fails.
pub async fn get_current_step(
    scenario_id: ScenarioId,
    step_number: u32,
    content: &dyn ContentRepository,
) -> Result<StepLookup, DomainError> {
    if content.get_scenario(scenario_id).await?.is_none() {
        return Err(DomainError::NotFound(scenario_id.to_string()));
    }
    Ok(content
        .get_scenario_step(scenario_id, step_number)
        .await?
        .map_or(StepLookup::NoFurtherStep, StepLookup::Step))
}

/// Looks up the outcome of a scenario.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when the scenario has no outcome and
/// `DomainError::CollaboratorUnavailable` if the content lookup fails.
pub async fn get_outcome(
    scenario_id: ScenarioId,
    content: &dyn ContentRepository,
) -> Result<Outcome, DomainError> {
    content
        .get_outcome(scenario_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("outcome of {scenario_id}")))
}
