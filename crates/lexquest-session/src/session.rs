//! The per-player session record.

use lexquest_core::ids::UserId;
use lexquest_duel::domain::session::DuelSession;
use lexquest_scenario::domain::playthrough::ScenarioPlaythrough;
use serde::{Deserialize, Serialize};

/// Ephemeral state of one player. The duel and scenario slots are
/// independent and may both be occupied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The owner.
    pub user_id: UserId,
    /// The duel in progress, if any.
    pub duel: Option<DuelSession>,
    /// The scenario run in progress, if any.
    pub scenario: Option<ScenarioPlaythrough>,
}

impl Session {
    /// An empty session for `user_id`.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            duel: None,
            scenario: None,
        }
    }

    /// Whether both slots are free.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.duel.is_none() && self.scenario.is_none()
    }
}
