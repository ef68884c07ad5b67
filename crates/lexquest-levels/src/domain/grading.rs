//! Batch grading of a level submission.

use std::collections::BTreeMap;

use lexquest_core::catalog::{OptionLabel, Question};
use lexquest_core::error::DomainError;
use lexquest_core::ids::{LevelId, QuestionId};
use serde::Serialize;

/// Lowest percentage that passes a level. Compared against the truncated
/// percentage, so 59.9% fails.
pub const PASS_MARK: u32 = 60;

/// Feedback for one answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradedAnswer {
    /// The question.
    pub question_id: QuestionId,
    /// Its prompt.
    pub prompt: String,
    /// What the player picked.
    pub selected: OptionLabel,
    /// The right answer.
    pub correct_option: OptionLabel,
    /// Whether the pick was right.
    pub is_correct: bool,
    /// Why the right answer is right.
    pub explanation: String,
}

/// Outcome of grading one level submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeResult {
    /// The graded level.
    pub level_id: LevelId,
    /// Percentage of answered questions that were right, truncated.
    pub score: u32,
    /// `score >= PASS_MARK`.
    pub passed: bool,
    /// Right answers.
    pub correct_count: u32,
    /// Answered questions.
    pub total_count: u32,
    /// Per-question feedback, ordered by question id.
    pub answers: Vec<GradedAnswer>,
}

/// `correct / total` as a whole percentage, fraction dropped. `total` must be
/// non-zero.
#[must_use]
pub fn percentage(correct: u32, total: u32) -> u32 {
    let correct = u64::from(correct);
    let total = u64::from(total.max(1));
    u32::try_from(correct * 100 / total).unwrap_or(u32::MAX)
}

/// Grades `answers` against the questions of a level.
///
/// All-or-nothing: every key must belong to `questions` before anything is
/// scored.
///
/// # Errors
///
/// Returns `DomainError::AnswerSetEmpty` for an empty submission and
/// `DomainError::QuestionNotFound` for the first id outside the level.
pub fn grade(
    level_id: LevelId,
    questions: &[Question],
    answers: &BTreeMap<QuestionId, OptionLabel>,
) -> Result<GradeResult, DomainError> {
    if answers.is_empty() {
        return Err(DomainError::AnswerSetEmpty);
    }

    let by_id: BTreeMap<QuestionId, &Question> = questions.iter().map(|q| (q.id, q)).collect();
    let resolved = answers
        .iter()
        .map(|(id, &selected)| {
            by_id
                .get(id)
                .map(|question| (*question, selected))
                .ok_or(DomainError::QuestionNotFound(*id))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let graded: Vec<GradedAnswer> = resolved
        .into_iter()
        .map(|(question, selected)| GradedAnswer {
            question_id: question.id,
            prompt: question.prompt.clone(),
            selected,
            correct_option: question.correct_option,
            is_correct: question.is_correct(selected),
            explanation: question.explanation.clone(),
        })
        .collect();

    let total_count = u32::try_from(graded.len()).unwrap_or(u32::MAX);
    let correct_count =
        u32::try_from(graded.iter().filter(|a| a.is_correct).count()).unwrap_or(u32::MAX);
    let score = percentage(correct_count, total_count);

    Ok(GradeResult {
        level_id,
        score,
        passed: score >= PASS_MARK,
        correct_count,
        total_count,
        answers: graded,
    })
}
