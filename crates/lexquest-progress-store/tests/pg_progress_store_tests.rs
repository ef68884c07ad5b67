//! Integration tests for `PgProgressStore`.
//!
//! These need a PostgreSQL server reachable through `DATABASE_URL`; run them
//! with `cargo test -- --ignored`.

use chrono::{DateTime, TimeZone, Utc};
use lexquest_core::ids::{LevelId, QuestionId, ScenarioId, UserId};
use lexquest_core::progress::{
    DuelQuestionFact, LevelCompletionFact, ProgressStore, ScenarioCompletionFact,
};
use lexquest_progress_store::PgProgressStore;
use sqlx::PgPool;
use uuid::Uuid;

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, minute, 0).unwrap()
}

fn level_fact(user_id: UserId, level_number: u32, score: u32) -> LevelCompletionFact {
    LevelCompletionFact {
        user_id,
        level_id: LevelId(i64::from(level_number)),
        level_number,
        score,
        passed: score >= 60,
        updated_at: at(0),
    }
}

fn duel_fact(user_id: UserId, question_id: i64) -> DuelQuestionFact {
    DuelQuestionFact {
        user_id,
        question_id: QuestionId(question_id),
        is_correct: true,
        answered_at: at(1),
    }
}

// --- level facts ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_level_upsert_keeps_only_latest_attempt(pool: PgPool) {
    let store = PgProgressStore::new(pool);
    let user = UserId(Uuid::new_v4());

    store.upsert_level_completion(level_fact(user, 1, 80)).await.unwrap();
    store.upsert_level_completion(level_fact(user, 1, 40)).await.unwrap();

    let facts = store.level_completions(user).await.unwrap();
    assert_eq!(facts.len(), 1);
    assert_eq!(facts[0].score, 40);
    assert!(!facts[0].passed);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_unlock_rule_follows_passing_facts(pool: PgPool) {
    let store = PgProgressStore::new(pool);
    let user = UserId(Uuid::new_v4());

    assert!(store.is_level_unlocked(user, 1).await.unwrap());
    assert!(!store.is_level_unlocked(user, 2).await.unwrap());

    store.upsert_level_completion(level_fact(user, 1, 60)).await.unwrap();

    assert!(store.is_level_unlocked(user, 2).await.unwrap());
    assert!(!store.is_level_unlocked(user, 3).await.unwrap());
}

// --- scenario facts ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_scenario_upsert_is_idempotent(pool: PgPool) {
    let store = PgProgressStore::new(pool);
    let user = UserId(Uuid::new_v4());
    let fact = ScenarioCompletionFact {
        user_id: user,
        scenario_id: ScenarioId(1),
        completed: true,
        completed_at: at(2),
    };

    store.upsert_scenario_completion(fact.clone()).await.unwrap();
    store.upsert_scenario_completion(fact).await.unwrap();

    let facts = store.scenario_completions(user).await.unwrap();
    assert_eq!(facts.len(), 1);
    assert!(facts[0].completed);
}

// --- duel facts ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duel_facts_round_trip_and_reset(pool: PgPool) {
    let store = PgProgressStore::new(pool);
    let user = UserId(Uuid::new_v4());
    let other = UserId(Uuid::new_v4());

    store.record_duel_correct(duel_fact(user, 2)).await.unwrap();
    store.record_duel_correct(duel_fact(user, 1)).await.unwrap();
    store.record_duel_correct(duel_fact(user, 1)).await.unwrap();
    store.record_duel_correct(duel_fact(other, 1)).await.unwrap();

    assert_eq!(store.count_duel_facts_for(user).await.unwrap(), 2);
    let ids: Vec<i64> = store
        .list_duel_facts(user)
        .await
        .unwrap()
        .iter()
        .map(|f| f.question_id.0)
        .collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(
        store
            .duel_correct_question_ids(user)
            .await
            .unwrap()
            .contains(&QuestionId(2))
    );

    let removed = store.reset_duel_progress(user).await.unwrap();

    assert_eq!(removed, 2);
    assert_eq!(store.count_duel_facts_for(user).await.unwrap(), 0);
    assert_eq!(store.count_duel_facts_for(other).await.unwrap(), 1);
}
