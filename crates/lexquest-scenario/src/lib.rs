//! LexQuest — scenarios.
//!
//! Responsible for walking a player through a scenario chain step by step,
//! logging each answer, and recording completion when the outcome is reached.

pub mod application;
pub mod domain;
