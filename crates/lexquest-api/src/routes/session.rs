//! Routes for the per-player session.

use axum::extract::State;
use axum::routing::delete;
use axum::{Json, Router};
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;

/// Response body for DELETE /.
#[derive(Debug, Serialize)]
pub struct ClearSessionResponse {
    /// Whether a session was stored.
    pub cleared: bool,
}

/// DELETE /
///
/// Logs the player out: the duel and scenario run in progress are dropped.
/// Progress facts are kept.
#[instrument(skip(state))]
async fn clear(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<ClearSessionResponse>, ApiError> {
    let cleared = state.sessions.clear(user_id).await?;
    info!(cleared, "session cleared");
    Ok(Json(ClearSessionResponse { cleared }))
}

/// Returns the router for the session context.
pub fn router() -> Router<AppState> {
    Router::new().route("/", delete(clear))
}
