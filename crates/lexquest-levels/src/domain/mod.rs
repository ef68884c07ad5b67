//! Domain layer for the levels context.

pub mod commands;
pub mod grading;
