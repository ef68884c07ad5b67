//! Domain layer for the scenario context.

pub mod commands;
pub mod playthrough;
