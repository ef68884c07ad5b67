//! Commands for the scenario context.

use lexquest_core::catalog::OptionLabel;
use lexquest_core::command::Command;
use lexquest_core::ids::{ScenarioId, UserId};
use uuid::Uuid;

/// Command to start a scenario from its first step.
#[derive(Debug, Clone)]
pub struct BeginScenario {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The player.
    pub user_id: UserId,
    /// The scenario to play.
    pub scenario_id: ScenarioId,
}

impl Command for BeginScenario {
    fn command_type(&self) -> &'static str {
        "scenario.begin"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Command to answer one scenario step.
#[derive(Debug, Clone)]
pub struct SubmitScenarioStep {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The player.
    pub user_id: UserId,
    /// The scenario being played.
    pub scenario_id: ScenarioId,
    /// The 1-based step being answered.
    pub step_number: u32,
    /// The chosen option.
    pub selected: OptionLabel,
}

impl Command for SubmitScenarioStep {
    fn command_type(&self) -> &'static str {
        "scenario.submit_step"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Command to leave the feedback screen of a step.
#[derive(Debug, Clone)]
pub struct ContinueScenario {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The player.
    pub user_id: UserId,
    /// The scenario being played.
    pub scenario_id: ScenarioId,
    /// The step whose feedback was just shown.
    pub step_number: u32,
}

impl Command for ContinueScenario {
    fn command_type(&self) -> &'static str {
        "scenario.continue"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn user_id(&self) -> UserId {
        self.user_id
    }
}
