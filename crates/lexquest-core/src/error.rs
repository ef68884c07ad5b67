//! Domain error types.

use thiserror::Error;

use crate::ids::QuestionId;

/// Top-level domain error type shared by every engine.
///
/// All variants are recoverable at the boundary: the calling shell surfaces a
/// message and routes the player back to a safe screen.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced level, scenario, step or question does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A duel was requested but every duel question is already answered.
    #[error("no duel questions left to answer")]
    NoQuestionsAvailable,

    /// The action does not match the session's current state.
    #[error("state mismatch: {0}")]
    StateMismatch(String),

    /// A level submission carried no answers.
    #[error("answer set is empty")]
    AnswerSetEmpty,

    /// A level submission referenced a question outside the level.
    #[error("{0} is not part of the submitted level")]
    QuestionNotFound(QuestionId),

    /// Malformed caller input or catalog data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The content repository or progress store could not be reached.
    #[error("collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),
}
