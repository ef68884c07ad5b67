//! LexQuest API server entry point.

use std::sync::{Arc, Mutex};

use lexquest_api::config::Config;
use lexquest_api::error::AppError;
use lexquest_api::state::AppState;
use lexquest_api::{build_router, telemetry};
use lexquest_content::{Catalog, InMemoryContentRepository};
use lexquest_core::clock::SystemClock;
use lexquest_core::rng::{DeterministicRng, StdRandom};
use lexquest_progress_store::PgProgressStore;
use lexquest_progress_store::schema::MIGRATOR;
use lexquest_session::InMemorySessionStore;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;
    let tracer_provider = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting LexQuest API server");

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;
    MIGRATOR.run(&pool).await?;

    let catalog = Catalog::load(&config.catalog_path)?;
    let content = InMemoryContentRepository::new(catalog);
    let fingerprint = content.fingerprint().to_owned();

    let rng: Arc<Mutex<dyn DeterministicRng + Send>> =
        Arc::new(Mutex::new(StdRandom::from_entropy()));
    let app_state = AppState::new(
        Arc::new(SystemClock),
        rng,
        Arc::new(content),
        Arc::new(PgProgressStore::new(pool)),
        Arc::new(InMemorySessionStore::new()),
        config.duel,
        fingerprint,
    );

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    if let Some(provider) = tracer_provider {
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error = %e, "trace provider shutdown failed");
        }
    }

    Ok(())
}
