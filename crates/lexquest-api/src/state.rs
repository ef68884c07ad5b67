//! Shared application state.

use std::sync::{Arc, Mutex};

use lexquest_core::clock::Clock;
use lexquest_core::content::ContentRepository;
use lexquest_core::progress::ProgressStore;
use lexquest_core::rng::DeterministicRng;
use lexquest_duel::domain::settings::DuelSettings;
use lexquest_session::SessionStore;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock used to stamp progress facts.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Random source for opponent draws and shuffles.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Read-only catalog.
    pub content: Arc<dyn ContentRepository>,
    /// Durable progress facts.
    pub progress: Arc<dyn ProgressStore>,
    /// Per-player sessions.
    pub sessions: Arc<dyn SessionStore>,
    /// Duel tuning.
    pub duel_settings: DuelSettings,
    /// SHA-256 of the loaded catalog, reported by the health check.
    pub catalog_fingerprint: Arc<str>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        content: Arc<dyn ContentRepository>,
        progress: Arc<dyn ProgressStore>,
        sessions: Arc<dyn SessionStore>,
        duel_settings: DuelSettings,
        catalog_fingerprint: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            clock,
            rng,
            content,
            progress,
            sessions,
            duel_settings,
            catalog_fingerprint: catalog_fingerprint.into(),
        }
    }
}
