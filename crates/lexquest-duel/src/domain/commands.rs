//! Commands for the duel context.

use lexquest_core::catalog::OptionLabel;
use lexquest_core::command::Command;
use lexquest_core::ids::{QuestionId, UserId};
use uuid::Uuid;

/// Command to start a new duel, replacing any duel in progress.
#[derive(Debug, Clone)]
pub struct StartDuel {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The player.
    pub user_id: UserId,
    /// How many questions to play; `None` uses the configured default.
    pub question_count: Option<u32>,
    /// Whether to play the eligible questions in random order.
    pub shuffle: bool,
}

impl Command for StartDuel {
    fn command_type(&self) -> &'static str {
        "duel.start"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Command to answer the current duel question.
#[derive(Debug, Clone)]
pub struct SubmitDuelAnswer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The player.
    pub user_id: UserId,
    /// The question being answered; must be the current one.
    pub question_id: QuestionId,
    /// The chosen option.
    pub selected: OptionLabel,
}

impl Command for SubmitDuelAnswer {
    fn command_type(&self) -> &'static str {
        "duel.submit_answer"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Command to show the current question again without counting an attempt.
#[derive(Debug, Clone)]
pub struct RetryDuelQuestion {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The player.
    pub user_id: UserId,
}

impl Command for RetryDuelQuestion {
    fn command_type(&self) -> &'static str {
        "duel.retry_question"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Command to move past the current question without answering it.
#[derive(Debug, Clone)]
pub struct SkipDuelQuestion {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The player.
    pub user_id: UserId,
}

impl Command for SkipDuelQuestion {
    fn command_type(&self) -> &'static str {
        "duel.skip_question"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Command to forget every correctly answered duel question of a player.
#[derive(Debug, Clone)]
pub struct ResetDuelProgress {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The player.
    pub user_id: UserId,
}

impl Command for ResetDuelProgress {
    fn command_type(&self) -> &'static str {
        "duel.reset_progress"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn user_id(&self) -> UserId {
        self.user_id
    }
}
