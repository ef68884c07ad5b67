//! Application layer for the duel context.

pub mod command_handlers;
pub mod query_handlers;
