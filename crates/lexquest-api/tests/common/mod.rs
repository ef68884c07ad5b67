//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use lexquest_content::{Catalog, InMemoryContentRepository};
use lexquest_core::clock::Clock;
use lexquest_core::progress::ProgressStore;
use lexquest_core::rng::DeterministicRng;
use lexquest_duel::domain::settings::DuelSettings;
use lexquest_progress_store::PgProgressStore;
use lexquest_session::InMemorySessionStore;
use lexquest_test_support::{FixedClock, InMemoryProgressStore, MockRng};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use lexquest_api::extract::USER_ID_HEADER;
use lexquest_api::state::AppState;

/// Player used by requests that do not name one.
pub const PLAYER: Uuid = Uuid::from_u128(0xa11ce);

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

fn shipped_catalog() -> InMemoryContentRepository {
    let catalog = Catalog::from_yaml_str(include_str!("../../../../catalog/catalog.yaml")).unwrap();
    InMemoryContentRepository::new(catalog)
}

/// Build the full app router over the shipped catalog with the given
/// progress store and RNG. Uses the same route structure as `main.rs`.
pub fn build_app(
    progress: Arc<dyn ProgressStore>,
    rng: impl DeterministicRng + Send + 'static,
) -> Router {
    let content = shipped_catalog();
    let fingerprint = content.fingerprint().to_owned();
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(rng));
    let state = AppState::new(
        fixed_clock(),
        rng,
        Arc::new(content),
        progress,
        Arc::new(InMemorySessionStore::new()),
        DuelSettings::default(),
        fingerprint,
    );
    lexquest_api::build_router(state)
}

/// Build the app with in-memory progress and an opponent that always answers
/// correctly.
pub fn build_test_app() -> (Router, Arc<InMemoryProgressStore>) {
    let progress = Arc::new(InMemoryProgressStore::new());
    (build_app(progress.clone(), MockRng), progress)
}

/// Build the app with a real `PgProgressStore`.
pub fn build_pg_test_app(pool: PgPool) -> Router {
    build_app(Arc::new(PgProgressStore::new(pool)), MockRng)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    // Axum's own rejections carry plain-text bodies.
    let json = serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

/// Send a POST request with a JSON body as `PLAYER` and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    post_json_as(app, PLAYER, uri, body).await
}

/// Send a POST request with a JSON body as `player` and return the response.
pub async fn post_json_as(
    app: Router,
    player: Uuid,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header(USER_ID_HEADER, player.to_string())
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request as `PLAYER` and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header(USER_ID_HEADER, PLAYER.to_string())
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a DELETE request as `PLAYER` and return the response.
pub async fn delete_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(USER_ID_HEADER, PLAYER.to_string())
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}
