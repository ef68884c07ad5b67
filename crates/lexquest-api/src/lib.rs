//! LexQuest HTTP API.
//!
//! A thin shell over the engines: it resolves the player from the request,
//! loads their session, runs one engine action and saves the session back
//! when the action succeeded.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod views;

use axum::Router;

use crate::state::AppState;

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/duel", routes::duel::router())
        .nest("/api/v1/levels", routes::levels::router())
        .nest("/api/v1/scenarios", routes::scenarios::router())
        .nest("/api/v1/session", routes::session::router())
        .with_state(state)
}
