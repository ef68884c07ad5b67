//! Routes for the levels context.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use lexquest_core::catalog::{Level, OptionLabel};
use lexquest_core::ids::{LevelId, QuestionId};
use lexquest_levels::application::command_handlers;
use lexquest_levels::application::query_handlers::{self, LevelSummary};
use lexquest_levels::domain::commands::SubmitLevelAnswers;
use lexquest_levels::domain::grading::GradeResult;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;
use crate::views::QuestionView;

/// Request body for POST /{level_id}/submit.
#[derive(Debug, Deserialize)]
pub struct SubmitLevelRequest {
    /// Selected option per question id.
    pub answers: BTreeMap<QuestionId, OptionLabel>,
}

/// Response body for GET /{level_id}.
#[derive(Debug, Serialize)]
pub struct LevelResponse {
    /// The level.
    pub level: Level,
    /// Whether the player has unlocked it.
    pub unlocked: bool,
    /// Questions without answers.
    pub questions: Vec<QuestionView>,
}

/// GET /
#[instrument(skip(state))]
async fn list(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<LevelSummary>>, ApiError> {
    let levels =
        query_handlers::list_levels(user_id, state.content.as_ref(), state.progress.as_ref())
            .await?;
    Ok(Json(levels))
}

/// GET /{level_id}
#[instrument(skip(state))]
async fn show(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(level_id): Path<i64>,
) -> Result<Json<LevelResponse>, ApiError> {
    let view = query_handlers::get_level(
        user_id,
        LevelId(level_id),
        state.content.as_ref(),
        state.progress.as_ref(),
    )
    .await?;
    Ok(Json(LevelResponse {
        level: view.level,
        unlocked: view.unlocked,
        questions: view.questions.into_iter().map(QuestionView::from).collect(),
    }))
}

/// POST /{level_id}/submit
#[instrument(skip(state, request))]
async fn submit(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(level_id): Path<i64>,
    Json(request): Json<SubmitLevelRequest>,
) -> Result<Json<GradeResult>, ApiError> {
    let command = SubmitLevelAnswers {
        correlation_id: Uuid::new_v4(),
        user_id,
        level_id: LevelId(level_id),
        answers: request.answers,
    };

    info!(
        correlation_id = %command.correlation_id,
        answers = command.answers.len(),
        "handling submit_level_answers command"
    );

    let result = command_handlers::handle_submit_level_answers(
        &command,
        state.clock.as_ref(),
        state.content.as_ref(),
        state.progress.as_ref(),
    )
    .await?;

    Ok(Json(result))
}

/// Returns the router for the levels context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/{level_id}", get(show))
        .route("/{level_id}/submit", post(submit))
}
