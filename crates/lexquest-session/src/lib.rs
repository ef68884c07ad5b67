//! LexQuest — player sessions.
//!
//! Holds the ephemeral per-player state between actions: the duel in
//! progress and the scenario run. Nothing here is rebuilt from progress
//! facts, so an interrupted run cannot be resumed.

pub mod session;
pub mod store;

pub use session::Session;
pub use store::{InMemorySessionStore, SessionStore};
