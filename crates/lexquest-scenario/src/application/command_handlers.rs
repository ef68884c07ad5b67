//! Command handlers for the scenario context.
//!
//! Handlers take the player's scenario slot from the session and only touch
//! it once every lookup has succeeded.

use lexquest_core::catalog::{Outcome, Scenario, ScenarioStep};
use lexquest_core::clock::Clock;
use lexquest_core::command::Command;
use lexquest_core::content::ContentRepository;
use lexquest_core::error::DomainError;
use lexquest_core::ids::ScenarioId;
use lexquest_core::progress::{ProgressStore, ScenarioCompletionFact};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::domain::commands::{BeginScenario, ContinueScenario, SubmitScenarioStep};
use crate::domain::playthrough::{AnsweredStep, ScenarioPlaythrough};

/// A scenario and its first step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioStart {
    /// The scenario.
    pub scenario: Scenario,
    /// Step 1.
    pub step: ScenarioStep,
}

/// Feedback for an answered step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepFeedback {
    /// The logged answer.
    pub answer: AnsweredStep,
    /// The step's feedback text.
    pub feedback: String,
}

/// The end of a scenario with the recap of this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioCompletion {
    /// The scenario's outcome.
    pub outcome: Outcome,
    /// Answers logged during this run; empty when the outcome is replayed.
    pub answers: Vec<AnsweredStep>,
    /// Right answers in `answers`.
    pub correct_count: usize,
}

/// Where a continue action leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Continuation {
    /// The next step.
    Step(ScenarioStep),
    /// The outcome; the scenario is complete.
    Outcome(ScenarioCompletion),
}

fn step_not_found(scenario_id: ScenarioId, step_number: u32) -> DomainError {
    DomainError::NotFound(format!("{scenario_id} step {step_number}"))
}

/// Handles the `BeginScenario` command: resets the run to step 1 with an
/// empty log.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown scenario and
/// `DomainError::CollaboratorUnavailable` if the content lookup fails.
#[instrument(
    skip_all,
    fields(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        user_id = %command.user_id,
        scenario_id = command.scenario_id.0,
    )
)]
pub async fn handle_begin_scenario(
    command: &BeginScenario,
    playthrough: &mut Option<ScenarioPlaythrough>,
    content: &dyn ContentRepository,
) -> Result<ScenarioStart, DomainError> {
    let scenario = content
        .get_scenario(command.scenario_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(command.scenario_id.to_string()))?;
    let step = content
        .get_scenario_step(scenario.id, 1)
        .await?
        .ok_or_else(|| step_not_found(scenario.id, 1))?;

    *playthrough = Some(ScenarioPlaythrough::begin(scenario.id));
    info!("scenario started");
    Ok(ScenarioStart { scenario, step })
}

/// Handles the `SubmitScenarioStep` command: checks the choice and appends it
/// to the run's log. The cursor does not move on; that is
/// [`handle_continue_scenario`]'s job.
///
/// Submitting for a scenario other than the current run starts a fresh run
/// for it.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown step and
/// `DomainError::CollaboratorUnavailable` if the content lookup fails.
#[instrument(
    skip_all,
    fields(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        user_id = %command.user_id,
        scenario_id = command.scenario_id.0,
        step_number = command.step_number,
    )
)]
pub async fn handle_submit_scenario_step(
    command: &SubmitScenarioStep,
    playthrough: &mut Option<ScenarioPlaythrough>,
    content: &dyn ContentRepository,
) -> Result<StepFeedback, DomainError> {
    let step = content
        .get_scenario_step(command.scenario_id, command.step_number)
        .await?
        .ok_or_else(|| step_not_found(command.scenario_id, command.step_number))?;

    if playthrough
        .as_ref()
        .is_none_or(|run| run.scenario_id() != command.scenario_id)
    {
        debug!("no run for this scenario, starting one");
        *playthrough = Some(ScenarioPlaythrough::begin(command.scenario_id));
    }
    let run = playthrough.get_or_insert_with(|| ScenarioPlaythrough::begin(command.scenario_id));
    let answer = run.record(&step, command.selected);
    debug!(is_correct = answer.is_correct, "scenario step answered");

    Ok(StepFeedback {
        answer,
        feedback: step.feedback,
    })
}

/// Handles the `ContinueScenario` command: moves to the following step, or
/// past the last one resolves the outcome, upserts the completion fact and
/// clears the run.
///
/// Replaying past the end returns the same outcome again with an empty log;
/// the fact is upserted, never duplicated.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when the scenario has no outcome and
/// `DomainError::CollaboratorUnavailable` if a collaborator fails. The run is
/// unchanged in every error case.
#[instrument(
    skip_all,
    fields(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        user_id = %command.user_id,
        scenario_id = command.scenario_id.0,
        step_number = command.step_number,
    )
)]
pub async fn handle_continue_scenario(
    command: &ContinueScenario,
    playthrough: &mut Option<ScenarioPlaythrough>,
    clock: &dyn Clock,
    content: &dyn ContentRepository,
    progress: &dyn ProgressStore,
) -> Result<Continuation, DomainError> {
    let next_number = command.step_number.saturating_add(1);
    if let Some(next) = content
        .get_scenario_step(command.scenario_id, next_number)
        .await?
    {
        if let Some(run) = playthrough
            .as_mut()
            .filter(|run| run.scenario_id() == command.scenario_id)
        {
            run.move_to(next_number);
        }
        return Ok(Continuation::Step(next));
    }

    let outcome = content
        .get_outcome(command.scenario_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("outcome of {}", command.scenario_id)))?;
    progress
        .upsert_scenario_completion(ScenarioCompletionFact {
            user_id: command.user_id,
            scenario_id: command.scenario_id,
            completed: true,
            completed_at: clock.now(),
        })
        .await?;

    let answers = match playthrough.take() {
        Some(run) if run.scenario_id() == command.scenario_id => run.into_answers(),
        other => {
            *playthrough = other;
            Vec::new()
        }
    };
    let correct_count = answers.iter().filter(|a| a.is_correct).count();
    info!(
        answered = answers.len(),
        correct = correct_count,
        "scenario completed"
    );

    Ok(Continuation::Outcome(ScenarioCompletion {
        outcome,
        answers,
        correct_count,
    }))
}
