//! Command handlers for the duel context.
//!
//! Handlers take the player's duel slot from the session (`&mut Option`), run
//! one action against it and leave it untouched when they return an error.

use std::sync::Mutex;

use lexquest_core::catalog::OptionLabel;
use lexquest_core::clock::Clock;
use lexquest_core::command::Command;
use lexquest_core::content::ContentRepository;
use lexquest_core::error::DomainError;
use lexquest_core::progress::{DuelQuestionFact, ProgressStore};
use lexquest_core::rng::{DeterministicRng, shuffle, with_rng};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::domain::commands::{
    ResetDuelProgress, RetryDuelQuestion, SkipDuelQuestion, StartDuel, SubmitDuelAnswer,
};
use crate::domain::opponent::{OpponentAnswer, simulate};
use crate::domain::session::{AnswerEvaluation, DuelPrompt, DuelSession, DuelSummary, Progression};
use crate::domain::settings::DuelSettings;

/// A question to answer together with the opponent's answer for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuelRound {
    /// The question and running scores.
    pub prompt: DuelPrompt,
    /// What the opponent answered this round.
    pub opponent: OpponentAnswer,
}

/// What the player sees next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DuelStep {
    /// Same question again after a wrong answer.
    Retry(DuelPrompt),
    /// The next question.
    Next(DuelRound),
    /// The duel is over.
    Completed(DuelSummary),
}

/// Result of a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuelSubmission {
    /// How the submission was scored.
    pub feedback: AnswerEvaluation,
    /// Player score after the submission.
    pub user_score: u32,
    /// Opponent score after the submission.
    pub opponent_score: u32,
    /// What comes next.
    pub step: DuelStep,
}

fn no_duel() -> DomainError {
    DomainError::StateMismatch("no duel in progress".to_owned())
}

fn draw_opponent(
    correct_option: OptionLabel,
    settings: &DuelSettings,
    rng: &Mutex<dyn DeterministicRng + Send>,
) -> Result<OpponentAnswer, DomainError> {
    with_rng(rng, |rng| {
        simulate(correct_option, settings.opponent_accuracy(), rng)
    })
}

fn next_round(
    duel: &DuelSession,
    settings: &DuelSettings,
    rng: &Mutex<dyn DeterministicRng + Send>,
) -> Result<DuelRound, DomainError> {
    let prompt = duel.prompt()?;
    let opponent = draw_opponent(prompt.question.correct_option, settings, rng)?;
    Ok(DuelRound { prompt, opponent })
}

/// Handles the `StartDuel` command: picks the questions the player has not
/// yet answered correctly, optionally shuffles them, keeps the requested
/// number and replaces the duel slot with the new run.
///
/// The RNG is locked only inside synchronous draws, never across an await.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a zero question count,
/// `DomainError::NoQuestionsAvailable` when nothing is left to answer, and
/// `DomainError::CollaboratorUnavailable` if a collaborator fails.
#[instrument(
    skip_all,
    fields(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        user_id = %command.user_id,
    )
)]
pub async fn handle_start_duel(
    command: &StartDuel,
    duel: &mut Option<DuelSession>,
    settings: &DuelSettings,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
    content: &dyn ContentRepository,
    progress: &dyn ProgressStore,
) -> Result<DuelRound, DomainError> {
    let limit = command
        .question_count
        .unwrap_or_else(|| settings.default_question_count());
    if limit == 0 {
        return Err(DomainError::Validation(
            "question count must be at least 1".to_owned(),
        ));
    }

    let answered = progress.duel_correct_question_ids(command.user_id).await?;
    let mut questions = content.list_duel_questions(&answered).await?;
    if questions.is_empty() {
        info!(answered = answered.len(), "no duel questions left to answer");
        return Err(DomainError::NoQuestionsAvailable);
    }

    if command.shuffle {
        with_rng(rng, |rng| shuffle(&mut questions, rng))?;
    }
    questions.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

    let session = DuelSession::start(questions, clock.now())?;
    let round = next_round(&session, settings, rng)?;
    info!(
        questions = round.prompt.total_questions,
        shuffle = command.shuffle,
        "duel started"
    );
    *duel = Some(session);
    Ok(round)
}

/// Handles the `SubmitDuelAnswer` command: scores the answer, draws a fresh
/// opponent answer, records a progress fact for a correct answer and moves
/// the duel on.
///
/// # Errors
///
/// Returns `DomainError::StateMismatch` when no duel is in progress or the
/// answer is for a question other than the current one, and
/// `DomainError::CollaboratorUnavailable` if the progress write fails. The
/// duel is unchanged in every error case.
#[instrument(
    skip_all,
    fields(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        user_id = %command.user_id,
        question_id = command.question_id.0,
    )
)]
pub async fn handle_submit_duel_answer(
    command: &SubmitDuelAnswer,
    duel: &mut Option<DuelSession>,
    settings: &DuelSettings,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
    progress: &dyn ProgressStore,
) -> Result<DuelSubmission, DomainError> {
    let session = duel.as_ref().ok_or_else(no_duel)?;
    let current = session.expect_current(command.question_id).inspect_err(|err| {
        warn!(error = %err, "duel answer rejected");
    })?;
    let opponent = draw_opponent(current.correct_option, settings, rng)?;
    let evaluation = session.evaluate(command.question_id, command.selected, opponent)?;
    debug!(
        attempt = evaluation.attempt_number,
        is_correct = evaluation.is_correct,
        points = evaluation.points,
        opponent_points = evaluation.opponent_points,
        "duel answer scored"
    );

    let mut moved = session.clone();
    let progression = moved.apply(&evaluation);
    let user_score = moved.user_score();
    let opponent_score = moved.opponent_score();
    let step = match progression {
        Progression::Retry => DuelStep::Retry(moved.prompt()?),
        Progression::Advanced => DuelStep::Next(next_round(&moved, settings, rng)?),
        Progression::Finished => DuelStep::Completed(moved.summary()),
    };

    // Everything fallible has run; the fact write is the last step before commit.
    if evaluation.is_correct {
        progress
            .record_duel_correct(DuelQuestionFact {
                user_id: command.user_id,
                question_id: command.question_id,
                is_correct: true,
                answered_at: clock.now(),
            })
            .await?;
    }

    if matches!(step, DuelStep::Completed(_)) {
        *duel = None;
        info!(user_score, opponent_score, "duel completed");
    } else {
        *duel = Some(moved);
    }

    Ok(DuelSubmission {
        feedback: evaluation,
        user_score,
        opponent_score,
        step,
    })
}

/// Handles the `RetryDuelQuestion` command: returns the current question
/// as-is without counting an attempt or drawing an opponent answer.
///
/// # Errors
///
/// Returns `DomainError::StateMismatch` when no duel is in progress.
pub fn handle_retry_duel_question(
    command: &RetryDuelQuestion,
    duel: Option<&DuelSession>,
) -> Result<DuelPrompt, DomainError> {
    debug!(correlation_id = %command.correlation_id, "redisplaying duel question");
    duel.ok_or_else(no_duel)?.prompt()
}

/// Handles the `SkipDuelQuestion` command: moves past the current question
/// without scoring it or writing a fact. Skipping the last question finishes
/// the duel.
///
/// # Errors
///
/// Returns `DomainError::StateMismatch` when no duel is in progress.
#[instrument(
    skip_all,
    fields(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        user_id = %command.user_id,
    )
)]
pub fn handle_skip_duel_question(
    command: &SkipDuelQuestion,
    duel: &mut Option<DuelSession>,
    settings: &DuelSettings,
    rng: &Mutex<dyn DeterministicRng + Send>,
) -> Result<DuelStep, DomainError> {
    let session = duel.as_ref().ok_or_else(no_duel)?;
    let mut moved = session.clone();
    match moved.skip()? {
        Progression::Finished => {
            let summary = moved.summary();
            *duel = None;
            info!(
                user_score = summary.user_score,
                opponent_score = summary.opponent_score,
                "duel completed"
            );
            Ok(DuelStep::Completed(summary))
        }
        Progression::Advanced | Progression::Retry => {
            let round = next_round(&moved, settings, rng)?;
            *duel = Some(moved);
            Ok(DuelStep::Next(round))
        }
    }
}

/// Handles the `ResetDuelProgress` command: deletes the player's duel facts
/// so every question becomes eligible again. A duel in progress is left
/// alone.
///
/// # Errors
///
/// Returns `DomainError::CollaboratorUnavailable` if the delete fails.
#[instrument(
    skip_all,
    fields(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        user_id = %command.user_id,
    )
)]
pub async fn handle_reset_duel_progress(
    command: &ResetDuelProgress,
    progress: &dyn ProgressStore,
) -> Result<u64, DomainError> {
    let removed = progress.reset_duel_progress(command.user_id).await?;
    info!(removed, "duel progress reset");
    Ok(removed)
}
