//! Commands for the levels context.

use std::collections::BTreeMap;

use lexquest_core::catalog::OptionLabel;
use lexquest_core::command::Command;
use lexquest_core::ids::{LevelId, QuestionId, UserId};
use uuid::Uuid;

/// Command to grade a whole level in one go.
#[derive(Debug, Clone)]
pub struct SubmitLevelAnswers {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The player.
    pub user_id: UserId,
    /// The level being graded.
    pub level_id: LevelId,
    /// Selected option per answered question.
    pub answers: BTreeMap<QuestionId, OptionLabel>,
}

impl Command for SubmitLevelAnswers {
    fn command_type(&self) -> &'static str {
        "levels.submit_answers"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn user_id(&self) -> UserId {
        self.user_id
    }
}
