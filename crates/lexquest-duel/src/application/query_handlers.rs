//! Query handlers for the duel context.
//!
//! Both queries read progress facts only; they never look at a duel in
//! progress, so the results total is computed independently of the live
//! score.

use lexquest_core::catalog::OptionLabel;
use lexquest_core::content::ContentRepository;
use lexquest_core::error::DomainError;
use lexquest_core::ids::{QuestionId, UserId};
use lexquest_core::progress::ProgressStore;
use serde::Serialize;

use crate::domain::scoring::MAX_POINTS_PER_QUESTION;

/// How far the player is through the duel pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DuelOverview {
    /// Questions in the catalog's duel pool.
    pub total_questions: u32,
    /// Pool questions answered correctly at some point.
    pub answered: u32,
    /// Questions still eligible for a duel.
    pub remaining: u32,
}

/// One answered question on the results screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuelResultEntry {
    /// The question.
    pub question_id: QuestionId,
    /// Its prompt.
    pub prompt: String,
    /// The right answer.
    pub correct_option: OptionLabel,
    /// Why it is right.
    pub explanation: String,
}

/// Summary of every duel fact recorded for a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuelResults {
    /// Recorded facts for questions still in the pool.
    pub total_answered: u32,
    /// Those facts marked correct.
    pub total_correct: u32,
    /// `total_correct` times the first-attempt points.
    pub score: u32,
    /// `total_answered` times the first-attempt points.
    pub total_possible_points: u32,
    /// Questions in the catalog's duel pool.
    pub catalog_total: u32,
    /// Whether every pool question has a correct fact.
    pub all_completed: bool,
    /// Answered questions still present in the catalog, by id.
    pub entries: Vec<DuelResultEntry>,
}

/// Counts answered and remaining duel questions for a player.
///
/// # Errors
///
/// Returns `DomainError::CollaboratorUnavailable` if a collaborator fails.
pub async fn get_duel_overview(
    user_id: UserId,
    content: &dyn ContentRepository,
    progress: &dyn ProgressStore,
) -> Result<DuelOverview, DomainError> {
    let total_questions = content.count_duel_questions().await?;
    let answered_ids = progress.duel_correct_question_ids(user_id).await?;
    let eligible = content.list_duel_questions(&answered_ids).await?;
    let remaining = u32::try_from(eligible.len()).unwrap_or(u32::MAX);
    Ok(DuelOverview {
        total_questions,
        answered: total_questions.saturating_sub(remaining),
        remaining,
    })
}

/// Builds the results screen from the player's duel facts.
///
/// # Errors
///
/// Returns `DomainError::CollaboratorUnavailable` if a collaborator fails.
pub async fn get_duel_results(
    user_id: UserId,
    content: &dyn ContentRepository,
    progress: &dyn ProgressStore,
) -> Result<DuelResults, DomainError> {
    let facts = progress.list_duel_facts(user_id).await?;
    let catalog_total = content.count_duel_questions().await?;

    // Facts for questions no longer in the pool are left out of every total.
    let mut entries = Vec::with_capacity(facts.len());
    let mut total_correct = 0_u32;
    for fact in &facts {
        if let Some(question) = content.get_duel_question(fact.question_id).await? {
            if fact.is_correct {
                total_correct = total_correct.saturating_add(1);
            }
            entries.push(DuelResultEntry {
                question_id: question.id,
                prompt: question.prompt,
                correct_option: question.correct_option,
                explanation: question.explanation,
            });
        }
    }

    let total_answered = u32::try_from(entries.len()).unwrap_or(u32::MAX);
    Ok(DuelResults {
        total_answered,
        total_correct,
        score: total_correct.saturating_mul(MAX_POINTS_PER_QUESTION),
        total_possible_points: total_answered.saturating_mul(MAX_POINTS_PER_QUESTION),
        catalog_total,
        all_completed: total_correct >= catalog_total,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexquest_content::{Catalog, InMemoryContentRepository};
    use lexquest_core::progress::DuelQuestionFact;
    use lexquest_test_support::{FailingContentRepository, FixedClock, InMemoryProgressStore};
    use uuid::Uuid;

    fn shipped() -> InMemoryContentRepository {
        let catalog = Catalog::from_yaml_str(include_str!("../../../../catalog/catalog.yaml")).unwrap();
        InMemoryContentRepository::new(catalog)
    }

    async fn record(progress: &InMemoryProgressStore, user_id: UserId, ids: &[i64]) {
        for &id in ids {
            progress
                .record_duel_correct(DuelQuestionFact {
                    user_id,
                    question_id: QuestionId(id),
                    is_correct: true,
                    answered_at: FixedClock::standard().0,
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_overview_counts_remaining_questions() {
        // Arrange
        let content = shipped();
        let progress = InMemoryProgressStore::new();
        let user_id = UserId(Uuid::new_v4());
        record(&progress, user_id, &[1, 2, 3]).await;

        // Act
        let overview = get_duel_overview(user_id, &content, &progress).await.unwrap();

        // Assert
        assert_eq!(
            overview,
            DuelOverview {
                total_questions: 10,
                answered: 3,
                remaining: 7
            }
        );
    }

    #[tokio::test]
    async fn test_results_score_three_points_per_fact() {
        // Arrange
        let content = shipped();
        let progress = InMemoryProgressStore::new();
        let user_id = UserId(Uuid::new_v4());
        record(&progress, user_id, &[4, 2]).await;

        // Act
        let results = get_duel_results(user_id, &content, &progress).await.unwrap();

        // Assert
        assert_eq!(results.total_answered, 2);
        assert_eq!(results.total_correct, 2);
        assert_eq!(results.score, 6);
        assert_eq!(results.total_possible_points, 6);
        assert_eq!(results.catalog_total, 10);
        assert!(!results.all_completed);
        let ids: Vec<QuestionId> = results.entries.iter().map(|e| e.question_id).collect();
        assert_eq!(ids, vec![QuestionId(2), QuestionId(4)]);
    }

    #[tokio::test]
    async fn test_results_report_all_completed() {
        let content = shipped();
        let progress = InMemoryProgressStore::new();
        let user_id = UserId(Uuid::new_v4());
        record(&progress, user_id, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]).await;

        let results = get_duel_results(user_id, &content, &progress).await.unwrap();

        assert!(results.all_completed);
        assert_eq!(results.score, 30);
    }

    #[tokio::test]
    async fn test_facts_outside_the_pool_do_not_count() {
        // Arrange: nine pool questions answered plus one that left the catalog.
        let content = shipped();
        let progress = InMemoryProgressStore::new();
        let user_id = UserId(Uuid::new_v4());
        record(&progress, user_id, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 999]).await;

        // Act
        let overview = get_duel_overview(user_id, &content, &progress).await.unwrap();
        let results = get_duel_results(user_id, &content, &progress).await.unwrap();

        // Assert
        assert_eq!(overview.answered, 9);
        assert_eq!(overview.remaining, 1);
        assert_eq!(results.total_answered, 9);
        assert_eq!(results.total_correct, 9);
        assert_eq!(results.score, 27);
        assert_eq!(results.total_possible_points, 27);
        assert_eq!(results.entries.len(), 9);
        assert!(!results.all_completed);
    }

    #[tokio::test]
    async fn test_overview_surfaces_unavailable_content() {
        let progress = InMemoryProgressStore::new();

        let result = get_duel_overview(UserId(Uuid::new_v4()), &FailingContentRepository, &progress).await;

        match result.unwrap_err() {
            DomainError::CollaboratorUnavailable(_) => {}
            other => panic!("expected CollaboratorUnavailable, got {other:?}"),
        }
    }
}
