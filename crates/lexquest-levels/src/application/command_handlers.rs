//! Command handlers for the levels context.

use lexquest_core::clock::Clock;
use lexquest_core::command::Command;
use lexquest_core::content::ContentRepository;
use lexquest_core::error::DomainError;
use lexquest_core::progress::{LevelCompletionFact, ProgressStore};
use tracing::{info, instrument};

use crate::domain::commands::SubmitLevelAnswers;
use crate::domain::grading::{GradeResult, grade};

/// Handles the `SubmitLevelAnswers` command: grades the submission and
/// overwrites the player's fact for the level with this attempt.
///
/// The lock state of the level is not checked here.
///
/// # Errors
///
/// Returns `DomainError::AnswerSetEmpty` for an empty submission,
/// `DomainError::NotFound` for an unknown level,
/// `DomainError::QuestionNotFound` for an answer outside the level and
/// `DomainError::CollaboratorUnavailable` if a collaborator fails. Nothing is
/// written in any error case.
#[instrument(
    skip_all,
    fields(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        user_id = %command.user_id,
        level_id = command.level_id.0,
    )
)]
pub async fn handle_submit_level_answers(
    command: &SubmitLevelAnswers,
    clock: &dyn Clock,
    content: &dyn ContentRepository,
    progress: &dyn ProgressStore,
) -> Result<GradeResult, DomainError> {
    if command.answers.is_empty() {
        return Err(DomainError::AnswerSetEmpty);
    }
    let level = content
        .get_level(command.level_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(command.level_id.to_string()))?;
    let questions = content.list_questions(level.id).await?;

    let result = grade(level.id, &questions, &command.answers)?;

    progress
        .upsert_level_completion(LevelCompletionFact {
            user_id: command.user_id,
            level_id: level.id,
            level_number: level.number,
            score: result.score,
            passed: result.passed,
            updated_at: clock.now(),
        })
        .await?;
    info!(
        score = result.score,
        passed = result.passed,
        correct = result.correct_count,
        total = result.total_count,
        "level graded"
    );
    Ok(result)
}
