//! LexQuest — duel mode.
//!
//! Responsible for the adaptive quiz run against a simulated opponent:
//! question sequencing, retry-until-correct, score accumulation and the
//! duel overview and results screens.

pub mod application;
pub mod domain;
