//! Application layer for the levels context.

pub mod command_handlers;
pub mod query_handlers;
