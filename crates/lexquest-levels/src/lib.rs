//! LexQuest — leveled quizzes.
//!
//! Responsible for grading a full level submission, recording the latest
//! attempt, and presenting levels with their unlock state.

pub mod application;
pub mod domain;
