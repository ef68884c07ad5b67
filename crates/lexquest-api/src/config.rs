//! Server configuration read from the environment.

use std::net::SocketAddr;

use lexquest_duel::domain::settings::{
    DEFAULT_OPPONENT_ACCURACY, DEFAULT_QUESTION_COUNT, DuelSettings,
};

use crate::error::AppError;

/// Startup configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Pool size for the progress store.
    pub database_max_connections: u32,
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Path of the YAML catalog.
    pub catalog_path: String,
    /// Collector endpoint; OTLP export is off when unset.
    pub otlp_endpoint: Option<String>,
    /// Validated duel settings.
    pub duel: DuelSettings,
}

impl Config {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is missing or malformed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or a value does
    /// not parse or is out of range.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| AppError::Config("DATABASE_URL environment variable must be set".into()))?;
        let opponent_accuracy = parse_or(&lookup, "OPPONENT_ACCURACY", DEFAULT_OPPONENT_ACCURACY)?;
        let question_count = parse_or(&lookup, "DUEL_DEFAULT_QUESTION_COUNT", DEFAULT_QUESTION_COUNT)?;
        let duel = DuelSettings::new(opponent_accuracy, question_count)
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            database_url,
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: parse_or(&lookup, "PORT", 3000)?,
            catalog_path: lookup("CATALOG_PATH")
                .unwrap_or_else(|| "catalog/catalog.yaml".to_owned()),
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.trim().is_empty()),
            duel,
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} is invalid: {e}"))),
    }
}
