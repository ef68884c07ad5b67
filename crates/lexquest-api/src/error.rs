//! LexQuest — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lexquest_content::CatalogError;
use lexquest_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The catalog could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The trace exporter could not be built.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer error that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An engine or collaborator failed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The request did not identify a player.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            Self::Unauthenticated(_) => (StatusCode::UNAUTHORIZED, "unauthenticated"),
            Self::Domain(err) => match err {
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
                DomainError::QuestionNotFound(_) => (StatusCode::NOT_FOUND, "question_not_found"),
                DomainError::NoQuestionsAvailable => {
                    (StatusCode::CONFLICT, "no_questions_available")
                }
                DomainError::StateMismatch(_) => (StatusCode::CONFLICT, "state_mismatch"),
                DomainError::AnswerSetEmpty => (StatusCode::BAD_REQUEST, "answer_set_empty"),
                DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
                DomainError::CollaboratorUnavailable(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "collaborator_unavailable")
                }
            },
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            error: error_code,
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
