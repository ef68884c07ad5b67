//! Integration tests running the API against PostgreSQL.
//!
//! These need a PostgreSQL server reachable through `DATABASE_URL`; run them
//! with `cargo test -- --ignored`.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_level_result_survives_a_new_router(pool: PgPool) {
    // Arrange
    let app = common::build_pg_test_app(pool.clone());
    let (status, _) = common::post_json(
        app,
        "/api/v1/levels/1/submit",
        &json!({ "answers": { "101": "C", "102": "D", "103": "C" } }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Act
    let (_, levels) = common::get_json(common::build_pg_test_app(pool), "/api/v1/levels").await;

    // Assert
    assert_eq!(levels[0]["last_score"], 100);
    assert_eq!(levels[1]["unlocked"], true);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duel_facts_are_recorded_and_reset(pool: PgPool) {
    // Arrange
    let app = common::build_pg_test_app(pool);
    common::post_json(
        app.clone(),
        "/api/v1/duel/start",
        &json!({ "question_count": 1, "shuffle": false }),
    )
    .await;
    common::post_json(
        app.clone(),
        "/api/v1/duel/answer",
        &json!({ "question_id": 1, "selected": "C" }),
    )
    .await;

    // Act
    let (_, before) = common::get_json(app.clone(), "/api/v1/duel").await;
    let (_, reset) = common::post_json(app.clone(), "/api/v1/duel/reset", &json!({})).await;
    let (_, after) = common::get_json(app, "/api/v1/duel").await;

    // Assert
    assert_eq!(before["answered"], 1);
    assert_eq!(reset["removed"], 1);
    assert_eq!(after["answered"], 0);
}
