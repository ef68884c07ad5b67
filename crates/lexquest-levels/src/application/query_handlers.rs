//! Query handlers for the levels context.

use lexquest_core::catalog::{Level, Question};
use lexquest_core::content::ContentRepository;
use lexquest_core::error::DomainError;
use lexquest_core::ids::{LevelId, UserId};
use lexquest_core::progress::{ProgressStore, level_unlocked_by};
use serde::Serialize;

/// A level on the level list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelSummary {
    /// The level.
    pub level: Level,
    /// Whether the player may open it.
    pub unlocked: bool,
    /// Whether the latest attempt passed.
    pub completed: bool,
    /// Score of the latest attempt, if any.
    pub last_score: Option<u32>,
}

/// A level opened for play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelView {
    /// The level.
    pub level: Level,
    /// Whether the player has unlocked it.
    pub unlocked: bool,
    /// Its questions in catalog order.
    pub questions: Vec<Question>,
}

/// Lists every level by number with the player's unlock and completion state.
///
/// # Errors
///
/// Returns `DomainError::CollaboratorUnavailable` if a collaborator fails.
pub async fn list_levels(
    user_id: UserId,
    content: &dyn ContentRepository,
    progress: &dyn ProgressStore,
) -> Result<Vec<LevelSummary>, DomainError> {
    let levels = content.list_levels().await?;
    let facts = progress.level_completions(user_id).await?;

    Ok(levels
        .into_iter()
        .map(|level| {
            let fact = facts.iter().find(|f| f.level_id == level.id);
            LevelSummary {
                unlocked: level_unlocked_by(&facts, level.number),
                completed: fact.is_some_and(|f| f.passed),
                last_score: fact.map(|f| f.score),
                level,
            }
        })
        .collect())
}

/// Loads a level and its questions.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown level and
/// `DomainError::CollaboratorUnavailable` if a collaborator fails.
pub async fn get_level(
    user_id: UserId,
    level_id: LevelId,
    content: &dyn ContentRepository,
    progress: &dyn ProgressStore,
) -> Result<LevelView, DomainError> {
    let level = content
        .get_level(level_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(level_id.to_string()))?;
    let questions = content.list_questions(level.id).await?;
    let unlocked = progress.is_level_unlocked(user_id, level.number).await?;
    Ok(LevelView {
        level,
        unlocked,
        questions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexquest_content::{Catalog, InMemoryContentRepository};
    use lexquest_core::progress::LevelCompletionFact;
    use lexquest_test_support::{FixedClock, InMemoryProgressStore};
    use uuid::Uuid;

    fn shipped() -> InMemoryContentRepository {
        let catalog =
            Catalog::from_yaml_str(include_str!("../../../../catalog/catalog.yaml")).unwrap();
        InMemoryContentRepository::new(catalog)
    }

    async fn graded(progress: &InMemoryProgressStore, user_id: UserId, number: u32, score: u32) {
        progress
            .upsert_level_completion(LevelCompletionFact {
                user_id,
                level_id: LevelId(i64::from(number)),
                level_number: number,
                score,
                passed: score >= 60,
                updated_at: FixedClock::standard().0,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_fresh_player_sees_only_level_one_unlocked() {
        let levels = list_levels(UserId(Uuid::new_v4()), &shipped(), &InMemoryProgressStore::new())
            .await
            .unwrap();

        let unlocked: Vec<bool> = levels.iter().map(|l| l.unlocked).collect();
        assert_eq!(unlocked, vec![true, false, false]);
        assert!(levels.iter().all(|l| !l.completed && l.last_score.is_none()));
    }

    #[tokio::test]
    async fn test_passing_level_one_unlocks_level_two() {
        // Arrange
        let progress = InMemoryProgressStore::new();
        let user_id = UserId(Uuid::new_v4());
        graded(&progress, user_id, 1, 80).await;
        graded(&progress, user_id, 2, 40).await;

        // Act
        let levels = list_levels(user_id, &shipped(), &progress).await.unwrap();

        // Assert
        assert!(levels[0].completed);
        assert_eq!(levels[0].last_score, Some(80));
        assert!(levels[1].unlocked);
        assert!(!levels[1].completed);
        assert_eq!(levels[1].last_score, Some(40));
        assert!(!levels[2].unlocked);
    }

    #[tokio::test]
    async fn test_get_level_returns_questions_and_lock_state() {
        let progress = InMemoryProgressStore::new();
        let user_id = UserId(Uuid::new_v4());

        let view = get_level(user_id, LevelId(2), &shipped(), &progress)
            .await
            .unwrap();

        assert_eq!(view.level.number, 2);
        assert_eq!(view.questions.len(), 5);
        assert!(!view.unlocked);
    }

    #[tokio::test]
    async fn test_get_unknown_level_is_not_found() {
        let result = get_level(
            UserId(Uuid::new_v4()),
            LevelId(42),
            &shipped(),
            &InMemoryProgressStore::new(),
        )
        .await;

        match result.unwrap_err() {
            DomainError::NotFound(msg) => assert_eq!(msg, "level 42"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
