//! Session storage keyed by player.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use lexquest_core::error::DomainError;
use lexquest_core::ids::UserId;

use crate::session::Session;

/// Get/put access to sessions.
///
/// Writes replace the whole record; two concurrent actions of one player
/// resolve as last write wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the player's session, or an empty one if none is stored.
    async fn load(&self, user_id: UserId) -> Result<Session, DomainError>;

    /// Stores `session`, replacing any previous record of its owner.
    async fn save(&self, session: Session) -> Result<(), DomainError>;

    /// Drops the player's session. Returns whether one was stored.
    async fn clear(&self, user_id: UserId) -> Result<bool, DomainError>;
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<UserId, Session>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> Result<MutexGuard<'_, HashMap<UserId, Session>>, DomainError> {
        self.sessions
            .lock()
            .map_err(|_| DomainError::CollaboratorUnavailable("session store lock poisoned".to_owned()))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, user_id: UserId) -> Result<Session, DomainError> {
        Ok(self
            .sessions()?
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| Session::new(user_id)))
    }

    async fn save(&self, session: Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions()?;
        if session.is_empty() {
            sessions.remove(&session.user_id);
        } else {
            sessions.insert(session.user_id, session);
        }
        Ok(())
    }

    async fn clear(&self, user_id: UserId) -> Result<bool, DomainError> {
        let removed = self.sessions()?.remove(&user_id).is_some();
        tracing::debug!(user_id = %user_id, removed, "session cleared");
        Ok(removed)
    }
}
