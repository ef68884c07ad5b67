//! Routes for the scenario context.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use lexquest_core::catalog::{OptionLabel, Outcome};
use lexquest_core::ids::ScenarioId;
use lexquest_scenario::application::command_handlers::{self, StepFeedback};
use lexquest_scenario::application::query_handlers::{self, ScenarioSummary};
use lexquest_scenario::domain::commands;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;
use crate::views::{ContinuationView, ScenarioStartView, StepLookupView};

/// Request body for POST /{scenario_id}/steps/{step_number}/answer.
#[derive(Debug, Deserialize)]
pub struct AnswerStepRequest {
    /// The chosen option.
    pub selected: OptionLabel,
}

/// GET /
#[instrument(skip(state))]
async fn list(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<ScenarioSummary>>, ApiError> {
    let scenarios =
        query_handlers::list_scenarios(user_id, state.content.as_ref(), state.progress.as_ref())
            .await?;
    Ok(Json(scenarios))
}

/// POST /{scenario_id}/begin
#[instrument(skip(state))]
async fn begin(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(scenario_id): Path<i64>,
) -> Result<Json<ScenarioStartView>, ApiError> {
    let command = commands::BeginScenario {
        correlation_id: Uuid::new_v4(),
        user_id,
        scenario_id: ScenarioId(scenario_id),
    };

    info!(correlation_id = %command.correlation_id, "handling begin_scenario command");

    let mut session = state.sessions.load(user_id).await?;
    let start = command_handlers::handle_begin_scenario(
        &command,
        &mut session.scenario,
        state.content.as_ref(),
    )
    .await?;
    state.sessions.save(session).await?;

    Ok(Json(start.into()))
}

/// GET /{scenario_id}/steps/{step_number}
#[instrument(skip(state))]
async fn step(
    State(state): State<AppState>,
    CurrentUser(_user_id): CurrentUser,
    Path((scenario_id, step_number)): Path<(i64, u32)>,
) -> Result<Json<StepLookupView>, ApiError> {
    let lookup = query_handlers::get_current_step(
        ScenarioId(scenario_id),
        step_number,
        state.content.as_ref(),
    )
    .await?;
    Ok(Json(lookup.into()))
}

/// POST /{scenario_id}/steps/{step_number}/answer
#[instrument(skip(state, request))]
async fn answer(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path((scenario_id, step_number)): Path<(i64, u32)>,
    Json(request): Json<AnswerStepRequest>,
) -> Result<Json<StepFeedback>, ApiError> {
    let command = commands::SubmitScenarioStep {
        correlation_id: Uuid::new_v4(),
        user_id,
        scenario_id: ScenarioId(scenario_id),
        step_number,
        selected: request.selected,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_scenario_step command");

    let mut session = state.sessions.load(user_id).await?;
    let feedback = command_handlers::handle_submit_scenario_step(
        &command,
        &mut session.scenario,
        state.content.as_ref(),
    )
    .await?;
    state.sessions.save(session).await?;

    Ok(Json(feedback))
}

/// POST /{scenario_id}/steps/{step_number}/continue
#[instrument(skip(state))]
async fn proceed(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path((scenario_id, step_number)): Path<(i64, u32)>,
) -> Result<Json<ContinuationView>, ApiError> {
    let command = commands::ContinueScenario {
        correlation_id: Uuid::new_v4(),
        user_id,
        scenario_id: ScenarioId(scenario_id),
        step_number,
    };

    info!(correlation_id = %command.correlation_id, "handling continue_scenario command");

    let mut session = state.sessions.load(user_id).await?;
    let continuation = command_handlers::handle_continue_scenario(
        &command,
        &mut session.scenario,
        state.clock.as_ref(),
        state.content.as_ref(),
        state.progress.as_ref(),
    )
    .await?;
    state.sessions.save(session).await?;

    Ok(Json(continuation.into()))
}

/// GET /{scenario_id}/outcome
#[instrument(skip(state))]
async fn outcome(
    State(state): State<AppState>,
    CurrentUser(_user_id): CurrentUser,
    Path(scenario_id): Path<i64>,
) -> Result<Json<Outcome>, ApiError> {
    let outcome =
        query_handlers::get_outcome(ScenarioId(scenario_id), state.content.as_ref()).await?;
    Ok(Json(outcome))
}

/// Returns the router for the scenario context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/{scenario_id}/begin", post(begin))
        .route("/{scenario_id}/steps/{step_number}", get(step))
        .route("/{scenario_id}/steps/{step_number}/answer", post(answer))
        .route("/{scenario_id}/steps/{step_number}/continue", post(proceed))
        .route("/{scenario_id}/outcome", get(outcome))
}
