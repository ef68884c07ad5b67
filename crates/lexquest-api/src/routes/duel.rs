//! Routes for the duel context.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use lexquest_core::catalog::OptionLabel;
use lexquest_core::ids::QuestionId;
use lexquest_duel::application::query_handlers::{self, DuelOverview, DuelResults};
use lexquest_duel::application::command_handlers;
use lexquest_duel::domain::commands;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;
use crate::views::{DuelPromptView, DuelRoundView, DuelStepView, DuelSubmissionView};

/// Request body for POST /start.
#[derive(Debug, Deserialize)]
pub struct StartDuelRequest {
    /// Questions to play; the configured default when absent.
    #[serde(default)]
    pub question_count: Option<u32>,
    /// Random order; id order when absent.
    #[serde(default)]
    pub shuffle: bool,
}

/// Request body for POST /answer.
#[derive(Debug, Deserialize)]
pub struct SubmitDuelAnswerRequest {
    /// The current question.
    pub question_id: QuestionId,
    /// The chosen option.
    pub selected: OptionLabel,
}

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct DuelStatusResponse {
    /// Pool progress.
    #[serde(flatten)]
    pub overview: DuelOverview,
    /// The duel in progress, if any.
    pub current: Option<DuelPromptView>,
}

/// Response body for POST /reset.
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    /// Facts deleted.
    pub removed: u64,
}

/// GET /
#[instrument(skip(state))]
async fn status(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<DuelStatusResponse>, ApiError> {
    let overview =
        query_handlers::get_duel_overview(user_id, state.content.as_ref(), state.progress.as_ref())
            .await?;
    let session = state.sessions.load(user_id).await?;
    let current = session
        .duel
        .as_ref()
        .map(|duel| duel.prompt().map(DuelPromptView::from))
        .transpose()?;
    Ok(Json(DuelStatusResponse { overview, current }))
}

/// POST /start
#[instrument(skip(state, request))]
async fn start(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<StartDuelRequest>,
) -> Result<Json<DuelRoundView>, ApiError> {
    let command = commands::StartDuel {
        correlation_id: Uuid::new_v4(),
        user_id,
        question_count: request.question_count,
        shuffle: request.shuffle,
    };

    info!(correlation_id = %command.correlation_id, "handling start_duel command");

    let mut session = state.sessions.load(user_id).await?;
    let round = command_handlers::handle_start_duel(
        &command,
        &mut session.duel,
        &state.duel_settings,
        state.clock.as_ref(),
        &state.rng,
        state.content.as_ref(),
        state.progress.as_ref(),
    )
    .await?;
    state.sessions.save(session).await?;

    Ok(Json(round.into()))
}

/// POST /answer
#[instrument(skip(state, request))]
async fn answer(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<SubmitDuelAnswerRequest>,
) -> Result<Json<DuelSubmissionView>, ApiError> {
    let command = commands::SubmitDuelAnswer {
        correlation_id: Uuid::new_v4(),
        user_id,
        question_id: request.question_id,
        selected: request.selected,
    };

    info!(
        correlation_id = %command.correlation_id,
        question_id = command.question_id.0,
        "handling submit_duel_answer command"
    );

    let mut session = state.sessions.load(user_id).await?;
    let submission = command_handlers::handle_submit_duel_answer(
        &command,
        &mut session.duel,
        &state.duel_settings,
        state.clock.as_ref(),
        &state.rng,
        state.progress.as_ref(),
    )
    .await?;
    state.sessions.save(session).await?;

    Ok(Json(submission.into()))
}

/// POST /retry
#[instrument(skip(state))]
async fn retry(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<DuelPromptView>, ApiError> {
    let command = commands::RetryDuelQuestion {
        correlation_id: Uuid::new_v4(),
        user_id,
    };

    info!(correlation_id = %command.correlation_id, "handling retry_duel_question command");

    let session = state.sessions.load(user_id).await?;
    let prompt = command_handlers::handle_retry_duel_question(&command, session.duel.as_ref())?;

    Ok(Json(prompt.into()))
}

/// POST /skip
#[instrument(skip(state))]
async fn skip(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<DuelStepView>, ApiError> {
    let command = commands::SkipDuelQuestion {
        correlation_id: Uuid::new_v4(),
        user_id,
    };

    info!(correlation_id = %command.correlation_id, "handling skip_duel_question command");

    let mut session = state.sessions.load(user_id).await?;
    let step = command_handlers::handle_skip_duel_question(
        &command,
        &mut session.duel,
        &state.duel_settings,
        &state.rng,
    )?;
    state.sessions.save(session).await?;

    Ok(Json(step.into()))
}

/// GET /results
#[instrument(skip(state))]
async fn results(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<DuelResults>, ApiError> {
    let results =
        query_handlers::get_duel_results(user_id, state.content.as_ref(), state.progress.as_ref())
            .await?;
    Ok(Json(results))
}

/// POST /reset
#[instrument(skip(state))]
async fn reset(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<ResetResponse>, ApiError> {
    let command = commands::ResetDuelProgress {
        correlation_id: Uuid::new_v4(),
        user_id,
    };

    info!(correlation_id = %command.correlation_id, "handling reset_duel_progress command");

    let removed =
        command_handlers::handle_reset_duel_progress(&command, state.progress.as_ref()).await?;

    Ok(Json(ResetResponse { removed }))
}

/// Returns the router for the duel context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(status))
        .route("/start", post(start))
        .route("/answer", post(answer))
        .route("/retry", post(retry))
        .route("/skip", post(skip))
        .route("/results", get(results))
        .route("/reset", post(reset))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::routes::test_util::{get, post, read_json, shipped_state, state_with};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use lexquest_test_support::FailingProgressStore;
    use serde_json::json;
    use tower::ServiceExt;

    fn ordered_start(count: u32) -> serde_json::Value {
        json!({ "question_count": count, "shuffle": false })
    }

    #[tokio::test]
    async fn test_start_returns_first_question_without_answer() {
        // Arrange
        let (state, _) = shipped_state();
        let app = router().with_state(state);

        // Act
        let response = app.oneshot(post("/start", &ordered_start(2))).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["question"]["id"], 1);
        assert!(json["question"].get("correct_option").is_none());
        assert_eq!(json["total_questions"], 2);
        assert_eq!(json["opponent"]["is_correct"], true);
    }

    #[tokio::test]
    async fn test_empty_start_body_plays_in_id_order() {
        // Arrange: a shuffle with this RNG would put question 2 first.
        let (state, _) = shipped_state();
        let app = router().with_state(state);

        // Act
        let response = app.oneshot(post("/start", &json!({}))).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["question"]["id"], 1);
        assert_eq!(json["total_questions"], 5);
    }

    #[tokio::test]
    async fn test_missing_user_header_returns_401() {
        let (state, _) = shipped_state();
        let app = router().with_state(state);
        let request = Request::post("/start")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(read_json(response).await["error"], "unauthenticated");
    }

    #[tokio::test]
    async fn test_answer_without_duel_returns_409() {
        let (state, _) = shipped_state();
        let app = router().with_state(state);

        let response = app
            .oneshot(post("/answer", &json!({ "question_id": 1, "selected": "C" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(read_json(response).await["error"], "state_mismatch");
    }

    #[tokio::test]
    async fn test_wrong_then_right_answer_flow() {
        // Arrange: duel question 1 is answered with C.
        let (state, progress) = shipped_state();
        let app = router().with_state(state);
        app.clone().oneshot(post("/start", &ordered_start(2))).await.unwrap();

        // Act
        let wrong = app
            .clone()
            .oneshot(post("/answer", &json!({ "question_id": 1, "selected": "A" })))
            .await
            .unwrap();
        let right = app
            .clone()
            .oneshot(post("/answer", &json!({ "question_id": 1, "selected": "C" })))
            .await
            .unwrap();

        // Assert
        let wrong = read_json(wrong).await;
        assert_eq!(wrong["feedback"]["is_correct"], false);
        assert_eq!(wrong["next"]["status"], "retry");
        assert_eq!(wrong["opponent_score"], 3);
        let right = read_json(right).await;
        assert_eq!(right["feedback"]["points"], 2);
        assert_eq!(right["next"]["status"], "next");
        assert_eq!(right["next"]["question"]["id"], 2);
        assert_eq!(right["opponent_score"], 3);
        assert_eq!(progress.duel_writes(), 1);
    }

    #[tokio::test]
    async fn test_status_shows_current_question() {
        let (state, _) = shipped_state();
        let app = router().with_state(state);
        app.clone().oneshot(post("/start", &ordered_start(3))).await.unwrap();

        let response = app.oneshot(get("/")).await.unwrap();

        let json = read_json(response).await;
        assert_eq!(json["total_questions"], 10);
        assert_eq!(json["remaining"], 10);
        assert_eq!(json["current"]["question"]["id"], 1);
        assert_eq!(json["current"]["total_questions"], 3);
    }

    #[tokio::test]
    async fn test_retry_and_skip() {
        let (state, _) = shipped_state();
        let app = router().with_state(state);
        app.clone().oneshot(post("/start", &ordered_start(1))).await.unwrap();

        let retry = app.clone().oneshot(post("/retry", &json!({}))).await.unwrap();
        let skip = app.clone().oneshot(post("/skip", &json!({}))).await.unwrap();
        let after = app.oneshot(post("/retry", &json!({}))).await.unwrap();

        assert_eq!(retry.status(), StatusCode::OK);
        assert_eq!(read_json(retry).await["question"]["id"], 1);
        assert_eq!(read_json(skip).await["status"], "completed");
        assert_eq!(after.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_store_failure_returns_503() {
        // Arrange
        let state = state_with(Arc::new(FailingProgressStore));
        let app = router().with_state(state);

        // Act
        let response = app.oneshot(post("/start", &ordered_start(2))).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(read_json(response).await["error"], "collaborator_unavailable");
    }

    #[tokio::test]
    async fn test_results_and_reset() {
        // Arrange
        let (state, _) = shipped_state();
        let app = router().with_state(state);
        app.clone().oneshot(post("/start", &ordered_start(1))).await.unwrap();
        app.clone()
            .oneshot(post("/answer", &json!({ "question_id": 1, "selected": "C" })))
            .await
            .unwrap();

        // Act
        let results = read_json(app.clone().oneshot(get("/results")).await.unwrap()).await;
        let reset = read_json(app.clone().oneshot(post("/reset", &json!({}))).await.unwrap()).await;
        let after = read_json(app.oneshot(get("/results")).await.unwrap()).await;

        // Assert
        assert_eq!(results["total_answered"], 1);
        assert_eq!(results["score"], 3);
        assert_eq!(results["entries"][0]["correct_option"], "C");
        assert_eq!(reset["removed"], 1);
        assert_eq!(after["total_answered"], 0);
    }
}
