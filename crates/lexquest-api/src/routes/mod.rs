//! Route modules organized by bounded context.

pub mod duel;
pub mod health;
pub mod levels;
pub mod scenarios;
pub mod session;
