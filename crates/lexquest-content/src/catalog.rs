//! Catalog document parsing and validation.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use lexquest_core::catalog::{
    AnswerOptions, Level, OptionLabel, Outcome, Question, Scenario, ScenarioStep,
};
use lexquest_core::error::DomainError;
use lexquest_core::ids::{LevelId, QuestionId, ScenarioId};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// The path that was read.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not valid YAML for the catalog schema.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The document parsed but breaks a catalog rule.
    #[error("invalid catalog: {0}")]
    Invalid(String),
}

impl From<CatalogError> for DomainError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Io { .. } => Self::CollaboratorUnavailable(err.to_string()),
            CatalogError::Parse(_) | CatalogError::Invalid(_) => Self::Validation(err.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    #[serde(default)]
    levels: Vec<LevelDocument>,
    #[serde(default)]
    duel_questions: Vec<QuestionDocument>,
    #[serde(default)]
    scenarios: Vec<ScenarioDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LevelDocument {
    id: i64,
    number: u32,
    title: String,
    #[serde(default)]
    description: String,
    questions: Vec<QuestionDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct QuestionDocument {
    id: i64,
    prompt: String,
    options: AnswerOptions,
    correct: OptionLabel,
    explanation: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioDocument {
    id: i64,
    domain: String,
    law_involved: String,
    title: String,
    steps: Vec<StepDocument>,
    outcome: OutcomeDocument,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StepDocument {
    step: u32,
    narrative: String,
    options: AnswerOptions,
    correct: OptionLabel,
    feedback: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutcomeDocument {
    summary: String,
    learning: String,
}

impl QuestionDocument {
    fn into_question(self) -> Question {
        Question {
            id: QuestionId(self.id),
            prompt: self.prompt,
            options: self.options,
            correct_option: self.correct,
            explanation: self.explanation,
        }
    }
}

/// A validated, immutable quiz catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) levels: Vec<Level>,
    pub(crate) level_questions: BTreeMap<LevelId, Vec<Question>>,
    pub(crate) duel_questions: BTreeMap<QuestionId, Question>,
    pub(crate) scenarios: BTreeMap<ScenarioId, Scenario>,
    pub(crate) steps: BTreeMap<ScenarioId, Vec<ScenarioStep>>,
    pub(crate) outcomes: BTreeMap<ScenarioId, Outcome>,
    fingerprint: String,
}

impl Catalog {
    /// Reads and validates a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, and the errors of
    /// [`Catalog::from_yaml_str`] otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&text)?;
        tracing::info!(
            path = %path.display(),
            levels = catalog.levels.len(),
            duel_questions = catalog.duel_questions.len(),
            scenarios = catalog.scenarios.len(),
            fingerprint = %catalog.fingerprint,
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parses and validates a catalog document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed YAML and
    /// `CatalogError::Invalid` for duplicate ids or level numbers, levels or
    /// scenarios without content, and scenario steps that are not numbered
    /// densely from 1.
    pub fn from_yaml_str(text: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_yaml::from_str(text)?;
        let mut catalog = Self {
            fingerprint: format!("{:x}", Sha256::digest(text.as_bytes())),
            ..Self::default()
        };

        let mut level_numbers = HashSet::new();
        let mut level_question_ids = HashSet::new();
        for level in document.levels {
            let level_id = LevelId(level.id);
            if catalog.level_questions.contains_key(&level_id) {
                return Err(invalid(format!("duplicate {level_id}")));
            }
            if level.number == 0 || !level_numbers.insert(level.number) {
                return Err(invalid(format!(
                    "{level_id} has a zero or duplicate number {}",
                    level.number
                )));
            }
            if level.questions.is_empty() {
                return Err(invalid(format!("{level_id} has no questions")));
            }
            let mut questions = Vec::with_capacity(level.questions.len());
            for question in level.questions {
                if !level_question_ids.insert(question.id) {
                    return Err(invalid(format!(
                        "duplicate level {}",
                        QuestionId(question.id)
                    )));
                }
                questions.push(question.into_question());
            }
            catalog.levels.push(Level {
                id: level_id,
                number: level.number,
                title: level.title,
                description: level.description,
            });
            catalog.level_questions.insert(level_id, questions);
        }
        catalog.levels.sort_by_key(|level| level.number);

        for question in document.duel_questions {
            let question = question.into_question();
            if catalog.duel_questions.contains_key(&question.id) {
                return Err(invalid(format!("duplicate duel {}", question.id)));
            }
            catalog.duel_questions.insert(question.id, question);
        }

        for scenario in document.scenarios {
            let scenario_id = ScenarioId(scenario.id);
            if catalog.scenarios.contains_key(&scenario_id) {
                return Err(invalid(format!("duplicate {scenario_id}")));
            }
            if scenario.steps.is_empty() {
                return Err(invalid(format!("{scenario_id} has no steps")));
            }
            let mut steps = Vec::with_capacity(scenario.steps.len());
            for (expected, step) in (1u32..).zip(scenario.steps) {
                if step.step != expected {
                    return Err(invalid(format!(
                        "{scenario_id} step {} found where step {expected} was expected",
                        step.step
                    )));
                }
                steps.push(ScenarioStep {
                    scenario_id,
                    step_number: step.step,
                    narrative: step.narrative,
                    options: step.options,
                    correct_option: step.correct,
                    feedback: step.feedback,
                });
            }
            catalog.scenarios.insert(
                scenario_id,
                Scenario {
                    id: scenario_id,
                    domain: scenario.domain,
                    law_involved: scenario.law_involved,
                    title: scenario.title,
                },
            );
            catalog.steps.insert(scenario_id, steps);
            catalog.outcomes.insert(
                scenario_id,
                Outcome {
                    scenario_id,
                    summary: scenario.outcome.summary,
                    learning: scenario.outcome.learning,
                },
            );
        }

        Ok(catalog)
    }

    /// Hex-encoded SHA-256 of the source document.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn invalid(message: String) -> CatalogError {
    CatalogError::Invalid(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
levels:
  - id: 2
    number: 2
    title: "Contracts"
    questions:
      - id: 21
        prompt: "Q21"
        options: { a: "a", b: "b", c: "c", d: "d" }
        correct: B
        explanation: "because"
  - id: 1
    number: 1
    title: "Basics"
    description: "start here"
    questions:
      - id: 11
        prompt: "Q11"
        options: { a: "a", b: "b", c: "c", d: "d" }
        correct: A
        explanation: "because"
duel_questions:
  - id: 5
    prompt: "D5"
    options: { a: "a", b: "b", c: "c", d: "d" }
    correct: D
    explanation: "because"
scenarios:
  - id: 9
    domain: "Consumer"
    law_involved: "Consumer Protection Act"
    title: "Overcharging"
    steps:
      - step: 1
        narrative: "first"
        options: { a: "a", b: "b", c: "c", d: "d" }
        correct: C
        feedback: "good"
    outcome:
      summary: "refund"
      learning: "keep bills"
"#;

    #[test]
    fn test_from_yaml_str_builds_sorted_levels_and_lookups() {
        let catalog = Catalog::from_yaml_str(MINIMAL).unwrap();

        let numbers: Vec<u32> = catalog.levels.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(catalog.level_questions[&LevelId(2)][0].correct_option, OptionLabel::B);
        assert!(catalog.duel_questions.contains_key(&QuestionId(5)));
        assert_eq!(catalog.steps[&ScenarioId(9)].len(), 1);
        assert_eq!(catalog.outcomes[&ScenarioId(9)].summary, "refund");
    }

    #[test]
    fn test_fingerprint_is_stable_sha256_hex() {
        let a = Catalog::from_yaml_str(MINIMAL).unwrap();
        let b = Catalog::from_yaml_str(MINIMAL).unwrap();

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn test_rejects_non_dense_step_numbers() {
        let text = MINIMAL.replace("step: 1", "step: 2");

        match Catalog::from_yaml_str(&text) {
            Err(CatalogError::Invalid(msg)) => assert!(msg.contains("step 1 was expected")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_duplicate_level_numbers() {
        let text = MINIMAL.replace("number: 2", "number: 1");

        assert!(matches!(
            Catalog::from_yaml_str(&text),
            Err(CatalogError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_option_label() {
        let text = MINIMAL.replace("correct: D", "correct: E");

        assert!(matches!(
            Catalog::from_yaml_str(&text),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_catalog_error_maps_to_domain_validation() {
        let err: DomainError = CatalogError::Invalid("bad".into()).into();

        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_shipped_catalog_is_valid() {
        let text = include_str!("../../../catalog/catalog.yaml");

        let catalog = Catalog::from_yaml_str(text).unwrap();

        assert_eq!(catalog.levels.len(), 3);
        assert_eq!(catalog.duel_questions.len(), 10);
        assert_eq!(catalog.scenarios.len(), 3);
    }
}
