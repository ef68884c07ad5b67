//! Response shapes that withhold answers the player has not earned yet.

use lexquest_core::catalog::{AnswerOptions, Question, Scenario, ScenarioStep};
use lexquest_core::ids::{QuestionId, ScenarioId};
use lexquest_duel::application::command_handlers::{DuelRound, DuelStep, DuelSubmission};
use lexquest_duel::domain::opponent::OpponentAnswer;
use lexquest_duel::domain::session::{AnswerEvaluation, DuelPrompt, DuelSummary};
use lexquest_scenario::application::command_handlers::{
    Continuation, ScenarioCompletion, ScenarioStart,
};
use lexquest_scenario::application::query_handlers::StepLookup;
use serde::Serialize;

/// A question without its answer or explanation.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    /// Question identifier.
    pub id: QuestionId,
    /// Prompt text.
    pub prompt: String,
    /// The four options.
    pub options: AnswerOptions,
}

impl From<Question> for QuestionView {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            prompt: question.prompt,
            options: question.options,
        }
    }
}

/// A scenario step without its answer or feedback.
#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    /// Owning scenario.
    pub scenario_id: ScenarioId,
    /// 1-based step number.
    pub step_number: u32,
    /// Narrative text.
    pub narrative: String,
    /// The four choices.
    pub options: AnswerOptions,
}

impl From<ScenarioStep> for StepView {
    fn from(step: ScenarioStep) -> Self {
        Self {
            scenario_id: step.scenario_id,
            step_number: step.step_number,
            narrative: step.narrative,
            options: step.options,
        }
    }
}

/// A scenario with its first step.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioStartView {
    /// The scenario.
    pub scenario: Scenario,
    /// Step 1.
    pub step: StepView,
}

impl From<ScenarioStart> for ScenarioStartView {
    fn from(start: ScenarioStart) -> Self {
        Self {
            scenario: start.scenario,
            step: start.step.into(),
        }
    }
}

/// A step looked up by number.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepLookupView {
    /// The step exists.
    Step(StepView),
    /// Past the last step.
    NoFurtherStep,
}

impl From<StepLookup> for StepLookupView {
    fn from(lookup: StepLookup) -> Self {
        match lookup {
            StepLookup::Step(step) => Self::Step(step.into()),
            StepLookup::NoFurtherStep => Self::NoFurtherStep,
        }
    }
}

/// Where a continue action leads.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ContinuationView {
    /// The next step.
    Step(StepView),
    /// The outcome with this run's answers.
    Outcome(ScenarioCompletion),
}

impl From<Continuation> for ContinuationView {
    fn from(continuation: Continuation) -> Self {
        match continuation {
            Continuation::Step(step) => Self::Step(step.into()),
            Continuation::Outcome(completion) => Self::Outcome(completion),
        }
    }
}

/// The current duel question with running scores.
#[derive(Debug, Clone, Serialize)]
pub struct DuelPromptView {
    /// The question.
    pub question: QuestionView,
    /// 1-based position in the duel.
    pub question_number: usize,
    /// Questions in the duel.
    pub total_questions: usize,
    /// Submissions made so far for this question.
    pub attempts_so_far: u32,
    /// Player score so far.
    pub user_score: u32,
    /// Opponent score so far.
    pub opponent_score: u32,
}

impl From<DuelPrompt> for DuelPromptView {
    fn from(prompt: DuelPrompt) -> Self {
        Self {
            question: prompt.question.into(),
            question_number: prompt.question_number,
            total_questions: prompt.total_questions,
            attempts_so_far: prompt.attempts_so_far,
            user_score: prompt.user_score,
            opponent_score: prompt.opponent_score,
        }
    }
}

/// A duel question with the opponent's answer for this round.
#[derive(Debug, Clone, Serialize)]
pub struct DuelRoundView {
    /// The question and scores.
    #[serde(flatten)]
    pub prompt: DuelPromptView,
    /// The opponent's answer.
    pub opponent: OpponentAnswer,
}

impl From<DuelRound> for DuelRoundView {
    fn from(round: DuelRound) -> Self {
        Self {
            prompt: round.prompt.into(),
            opponent: round.opponent,
        }
    }
}

/// What the player sees after a submission or skip.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DuelStepView {
    /// Same question again.
    Retry(DuelPromptView),
    /// The next question.
    Next(DuelRoundView),
    /// Final scores.
    Completed(DuelSummary),
}

impl From<DuelStep> for DuelStepView {
    fn from(step: DuelStep) -> Self {
        match step {
            DuelStep::Retry(prompt) => Self::Retry(prompt.into()),
            DuelStep::Next(round) => Self::Next(round.into()),
            DuelStep::Completed(summary) => Self::Completed(summary),
        }
    }
}

/// Response to a duel answer.
#[derive(Debug, Clone, Serialize)]
pub struct DuelSubmissionView {
    /// Scoring of the answer, including the right option.
    pub feedback: AnswerEvaluation,
    /// Player score after the answer.
    pub user_score: u32,
    /// Opponent score after the answer.
    pub opponent_score: u32,
    /// What comes next.
    pub next: DuelStepView,
}

impl From<DuelSubmission> for DuelSubmissionView {
    fn from(submission: DuelSubmission) -> Self {
        Self {
            feedback: submission.feedback,
            user_score: submission.user_score,
            opponent_score: submission.opponent_score,
            next: submission.step.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexquest_core::catalog::OptionLabel;

    fn question() -> Question {
        Question {
            id: QuestionId(3),
            prompt: "Which law?".into(),
            options: AnswerOptions {
                a: "a".into(),
                b: "b".into(),
                c: "c".into(),
                d: "d".into(),
            },
            correct_option: OptionLabel::D,
            explanation: "secret".into(),
        }
    }

    #[test]
    fn test_question_view_hides_answer_and_explanation() {
        let json = serde_json::to_value(QuestionView::from(question())).unwrap();

        assert_eq!(json["id"], 3);
        assert!(json.get("correct_option").is_none());
        assert!(json.get("explanation").is_none());
    }

    #[test]
    fn test_round_view_flattens_prompt_next_to_opponent() {
        let round = DuelRound {
            prompt: DuelPrompt {
                question: question(),
                question_number: 1,
                total_questions: 2,
                attempts_so_far: 0,
                user_score: 0,
                opponent_score: 0,
            },
            opponent: OpponentAnswer {
                answer: OptionLabel::A,
                is_correct: false,
            },
        };

        let json = serde_json::to_value(DuelStepView::Next(round.into())).unwrap();

        assert_eq!(json["status"], "next");
        assert_eq!(json["question"]["prompt"], "Which law?");
        assert_eq!(json["opponent"]["answer"], "A");
        assert_eq!(json["total_questions"], 2);
    }
}
