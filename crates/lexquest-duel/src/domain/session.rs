//! The in-progress duel held in a player's session.
//!
//! A submission is handled in two steps: [`DuelSession::evaluate`] scores it
//! without touching state, and [`DuelSession::apply`] commits the result. The
//! handler writes the progress fact between the two, so a failed write leaves
//! the duel exactly as it was.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use lexquest_core::catalog::{OptionLabel, Question};
use lexquest_core::error::DomainError;
use lexquest_core::ids::QuestionId;
use serde::{Deserialize, Serialize};

use crate::domain::opponent::{OPPONENT_POINTS, OpponentAnswer};
use crate::domain::scoring;

/// Run state of one duel.
///
/// Exists only while the duel is in progress; a finished duel is removed from
/// the session by the handler that finished it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuelSession {
    questions: Vec<Question>,
    cursor: usize,
    user_score: u32,
    opponent_score: u32,
    attempts: BTreeMap<QuestionId, u32>,
    opponent_awarded: BTreeSet<QuestionId>,
    started_at: DateTime<Utc>,
}

/// The scored result of one submission, before it is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerEvaluation {
    /// The answered question.
    pub question_id: QuestionId,
    /// What the player picked.
    pub selected: OptionLabel,
    /// The right answer.
    pub correct_option: OptionLabel,
    /// Whether the player was right.
    pub is_correct: bool,
    /// 1-based attempt count including this submission.
    pub attempt_number: u32,
    /// Points earned by the player for this submission.
    pub points: u32,
    /// The opponent's answer drawn for this round.
    pub opponent: OpponentAnswer,
    /// Points credited to the opponent for this round.
    pub opponent_points: u32,
    /// Explanation of the right answer.
    pub explanation: String,
}

/// Where the duel stands after a submission or skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progression {
    /// Wrong answer; the same question stays current.
    Retry,
    /// The cursor moved to the next question.
    Advanced,
    /// The cursor moved past the last question.
    Finished,
}

/// A question ready to be shown, with the running scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuelPrompt {
    /// The current question.
    pub question: Question,
    /// 1-based position of the question in this duel.
    pub question_number: usize,
    /// Number of questions in this duel.
    pub total_questions: usize,
    /// Submissions made so far for this question.
    pub attempts_so_far: u32,
    /// Player score so far.
    pub user_score: u32,
    /// Opponent score so far.
    pub opponent_score: u32,
}

/// Who came out ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuelWinner {
    /// The player scored more.
    Player,
    /// The opponent scored more.
    Opponent,
    /// Equal scores.
    Draw,
}

/// Final scores of a completed duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DuelSummary {
    /// Final player score.
    pub user_score: u32,
    /// Final opponent score.
    pub opponent_score: u32,
    /// Number of questions in the duel.
    pub total_questions: usize,
    /// Who won.
    pub winner: DuelWinner,
}

impl DuelSession {
    /// Starts a duel over a snapshot of `questions`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NoQuestionsAvailable` if `questions` is empty.
    pub fn start(questions: Vec<Question>, started_at: DateTime<Utc>) -> Result<Self, DomainError> {
        if questions.is_empty() {
            return Err(DomainError::NoQuestionsAvailable);
        }
        Ok(Self {
            questions,
            cursor: 0,
            user_score: 0,
            opponent_score: 0,
            attempts: BTreeMap::new(),
            opponent_awarded: BTreeSet::new(),
            started_at,
        })
    }

    /// The question at the cursor.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StateMismatch` if the cursor is past the end.
    pub fn current_question(&self) -> Result<&Question, DomainError> {
        self.questions
            .get(self.cursor)
            .ok_or_else(|| DomainError::StateMismatch("the duel has no current question".to_owned()))
    }

    /// The question at the cursor, checked against the one the caller answered.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StateMismatch` if `question_id` is not current.
    pub fn expect_current(&self, question_id: QuestionId) -> Result<&Question, DomainError> {
        let current = self.current_question()?;
        if current.id != question_id {
            return Err(DomainError::StateMismatch(format!(
                "{question_id} submitted while {} is current",
                current.id
            )));
        }
        Ok(current)
    }

    /// Scores a submission for the current question without mutating the duel.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StateMismatch` if `question_id` is not current.
    pub fn evaluate(
        &self,
        question_id: QuestionId,
        selected: OptionLabel,
        opponent: OpponentAnswer,
    ) -> Result<AnswerEvaluation, DomainError> {
        let question = self.expect_current(question_id)?;
        let attempt_number = self.attempts_for(question_id) + 1;
        let is_correct = question.is_correct(selected);
        let opponent_points = if opponent.is_correct && !self.opponent_awarded.contains(&question_id) {
            OPPONENT_POINTS
        } else {
            0
        };
        Ok(AnswerEvaluation {
            question_id,
            selected,
            correct_option: question.correct_option,
            is_correct,
            attempt_number,
            points: scoring::points(attempt_number, is_correct),
            opponent,
            opponent_points,
            explanation: question.explanation.clone(),
        })
    }

    /// Commits an evaluation produced by [`DuelSession::evaluate`].
    pub fn apply(&mut self, evaluation: &AnswerEvaluation) -> Progression {
        self.attempts
            .insert(evaluation.question_id, evaluation.attempt_number);
        if evaluation.opponent_points > 0 && self.opponent_awarded.insert(evaluation.question_id) {
            self.opponent_score += evaluation.opponent_points;
        }
        self.user_score += evaluation.points;
        if evaluation.is_correct {
            self.advance()
        } else {
            Progression::Retry
        }
    }

    /// Moves past the current question without scoring it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StateMismatch` if the cursor is already past the end.
    pub fn skip(&mut self) -> Result<Progression, DomainError> {
        self.current_question()?;
        Ok(self.advance())
    }

    fn advance(&mut self) -> Progression {
        self.cursor += 1;
        if self.cursor >= self.questions.len() {
            Progression::Finished
        } else {
            Progression::Advanced
        }
    }

    /// The current question with running scores.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StateMismatch` if the cursor is past the end.
    pub fn prompt(&self) -> Result<DuelPrompt, DomainError> {
        let question = self.current_question()?;
        Ok(DuelPrompt {
            question: question.clone(),
            question_number: self.cursor + 1,
            total_questions: self.questions.len(),
            attempts_so_far: self.attempts_for(question.id),
            user_score: self.user_score,
            opponent_score: self.opponent_score,
        })
    }

    /// Final scores.
    #[must_use]
    pub fn summary(&self) -> DuelSummary {
        let winner = match self.user_score.cmp(&self.opponent_score) {
            std::cmp::Ordering::Greater => DuelWinner::Player,
            std::cmp::Ordering::Less => DuelWinner::Opponent,
            std::cmp::Ordering::Equal => DuelWinner::Draw,
        };
        DuelSummary {
            user_score: self.user_score,
            opponent_score: self.opponent_score,
            total_questions: self.questions.len(),
            winner,
        }
    }

    /// Submissions made so far for `question_id`.
    #[must_use]
    pub fn attempts_for(&self, question_id: QuestionId) -> u32 {
        self.attempts.get(&question_id).copied().unwrap_or(0)
    }

    /// Whether the opponent has already been credited for `question_id`.
    #[must_use]
    pub fn opponent_awarded_for(&self, question_id: QuestionId) -> bool {
        self.opponent_awarded.contains(&question_id)
    }

    /// Player score so far.
    #[must_use]
    pub fn user_score(&self) -> u32 {
        self.user_score
    }

    /// Opponent score so far.
    #[must_use]
    pub fn opponent_score(&self) -> u32 {
        self.opponent_score
    }

    /// Ids of the snapshot questions, in play order.
    #[must_use]
    pub fn question_ids(&self) -> Vec<QuestionId> {
        self.questions.iter().map(|q| q.id).collect()
    }

    /// When the duel started.
    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
