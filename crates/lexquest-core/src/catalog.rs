//! Immutable catalog types owned by the content repository.
//!
//! The engines only read these values. A duel session keeps its own
//! point-in-time copies of the questions it was started with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{LevelId, QuestionId, ScenarioId};

/// One of the four answer labels shown next to every question and step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLabel {
    /// First option.
    A,
    /// Second option.
    B,
    /// Third option.
    C,
    /// Fourth option.
    D,
}

impl OptionLabel {
    /// Every label in display order.
    pub const ALL: [OptionLabel; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// The three labels other than `self`, in display order.
    #[must_use]
    pub fn others(self) -> [OptionLabel; 3] {
        let mut out = [Self::A; 3];
        let mut n = 0;
        for label in Self::ALL {
            if label != self {
                out[n] = label;
                n += 1;
            }
        }
        out
    }

    /// Returns the label as a single-character string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionLabel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "C" | "c" => Ok(Self::C),
            "D" | "d" => Ok(Self::D),
            other => Err(DomainError::Validation(format!(
                "unknown option label: {other:?}"
            ))),
        }
    }
}

/// The four labeled answer texts of a question or scenario step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOptions {
    /// Text for option A.
    pub a: String,
    /// Text for option B.
    pub b: String,
    /// Text for option C.
    pub c: String,
    /// Text for option D.
    pub d: String,
}

impl AnswerOptions {
    /// Returns the text shown for `label`.
    #[must_use]
    pub fn text(&self, label: OptionLabel) -> &str {
        match label {
            OptionLabel::A => &self.a,
            OptionLabel::B => &self.b,
            OptionLabel::C => &self.c,
            OptionLabel::D => &self.d,
        }
    }
}

/// A multiple-choice question, used both by levels and by the duel pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question identifier.
    pub id: QuestionId,
    /// The prompt shown to the player.
    pub prompt: String,
    /// The four labeled options.
    pub options: AnswerOptions,
    /// The label of the correct option.
    pub correct_option: OptionLabel,
    /// Explanation shown after answering.
    pub explanation: String,
}

impl Question {
    /// Returns `true` if `selected` is the correct option.
    #[must_use]
    pub fn is_correct(&self, selected: OptionLabel) -> bool {
        self.correct_option == selected
    }
}

/// A fixed-content level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Level identifier.
    pub id: LevelId,
    /// 1-based position in the unlock chain.
    pub number: u32,
    /// Display title.
    pub title: String,
    /// Short description.
    pub description: String,
}

/// A branching narrative scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario identifier.
    pub id: ScenarioId,
    /// Area of life the scenario covers (consumer, workplace, ...).
    pub domain: String,
    /// The law the scenario teaches.
    pub law_involved: String,
    /// Display title.
    pub title: String,
}

/// One step in a scenario chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioStep {
    /// Owning scenario.
    pub scenario_id: ScenarioId,
    /// 1-based, dense step number.
    pub step_number: u32,
    /// Narrative text for the step.
    pub narrative: String,
    /// The four labeled choices.
    pub options: AnswerOptions,
    /// The label of the correct choice.
    pub correct_option: OptionLabel,
    /// Feedback shown after the player chooses.
    pub feedback: String,
}

/// The single terminal outcome of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Owning scenario.
    pub scenario_id: ScenarioId,
    /// What happened in the end.
    pub summary: String,
    /// What the player should take away.
    pub learning: String,
}
