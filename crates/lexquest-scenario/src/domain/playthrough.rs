//! The scenario run held in a player's session.

use lexquest_core::catalog::{OptionLabel, ScenarioStep};
use lexquest_core::ids::ScenarioId;
use serde::{Deserialize, Serialize};

/// One logged answer, kept for the recap at the outcome screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredStep {
    /// The answered step.
    pub step_number: u32,
    /// Its narrative.
    pub narrative: String,
    /// What the player picked.
    pub selected: OptionLabel,
    /// The right choice.
    pub correct_option: OptionLabel,
    /// Whether the pick was right.
    pub is_correct: bool,
}

/// Position and answer log of one scenario run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioPlaythrough {
    scenario_id: ScenarioId,
    current_step: u32,
    answers: Vec<AnsweredStep>,
}

impl ScenarioPlaythrough {
    /// A fresh run at step 1 with an empty log.
    #[must_use]
    pub fn begin(scenario_id: ScenarioId) -> Self {
        Self {
            scenario_id,
            current_step: 1,
            answers: Vec::new(),
        }
    }

    /// Logs an answer to `step` and returns the log entry.
    pub fn record(&mut self, step: &ScenarioStep, selected: OptionLabel) -> AnsweredStep {
        let entry = AnsweredStep {
            step_number: step.step_number,
            narrative: step.narrative.clone(),
            selected,
            correct_option: step.correct_option,
            is_correct: step.correct_option == selected,
        };
        self.current_step = step.step_number;
        self.answers.push(entry.clone());
        entry
    }

    /// Moves the cursor to `step_number`.
    pub fn move_to(&mut self, step_number: u32) {
        self.current_step = step_number;
    }

    /// The scenario being played.
    #[must_use]
    pub fn scenario_id(&self) -> ScenarioId {
        self.scenario_id
    }

    /// The step the player is on.
    #[must_use]
    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    /// Answers logged so far, in submission order.
    #[must_use]
    pub fn answers(&self) -> &[AnsweredStep] {
        &self.answers
    }

    /// Consumes the run, returning its log.
    #[must_use]
    pub fn into_answers(self) -> Vec<AnsweredStep> {
        self.answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexquest_core::catalog::AnswerOptions;

    fn step(number: u32, correct: OptionLabel) -> ScenarioStep {
        ScenarioStep {
            scenario_id: ScenarioId(1),
            step_number: number,
            narrative: format!("step {number}"),
            options: AnswerOptions {
                a: "a".into(),
                b: "b".into(),
                c: "c".into(),
                d: "d".into(),
            },
            correct_option: correct,
            feedback: "noted".into(),
        }
    }

    #[test]
    fn test_begin_starts_at_step_one_with_empty_log() {
        let run = ScenarioPlaythrough::begin(ScenarioId(3));

        assert_eq!(run.scenario_id(), ScenarioId(3));
        assert_eq!(run.current_step(), 1);
        assert!(run.answers().is_empty());
    }

    #[test]
    fn test_record_appends_in_submission_order() {
        let mut run = ScenarioPlaythrough::begin(ScenarioId(1));

        let first = run.record(&step(1, OptionLabel::C), OptionLabel::C);
        let second = run.record(&step(2, OptionLabel::B), OptionLabel::A);

        assert!(first.is_correct);
        assert!(!second.is_correct);
        assert_eq!(second.correct_option, OptionLabel::B);
        assert_eq!(run.current_step(), 2);
        let numbers: Vec<u32> = run.answers().iter().map(|a| a.step_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }
}
