//! Domain layer for the duel context.

pub mod commands;
pub mod opponent;
pub mod scoring;
pub mod session;
pub mod settings;
