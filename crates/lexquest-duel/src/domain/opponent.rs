//! Simulated opponent.

use lexquest_core::catalog::OptionLabel;
use lexquest_core::rng::DeterministicRng;
use serde::Serialize;

/// Points credited to the opponent the first time it answers a question correctly.
pub const OPPONENT_POINTS: u32 = 3;

/// One simulated opponent answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpponentAnswer {
    /// The label the opponent picked.
    pub answer: OptionLabel,
    /// Whether the pick was correct.
    pub is_correct: bool,
}

/// Draws an opponent answer.
///
/// One uniform sample in `[0, 1)` decides correctness against `accuracy`; a
/// wrong answer is picked uniformly among the three other labels.
pub fn simulate(
    correct_option: OptionLabel,
    accuracy: f64,
    rng: &mut dyn DeterministicRng,
) -> OpponentAnswer {
    if rng.next_f64() < accuracy {
        return OpponentAnswer {
            answer: correct_option,
            is_correct: true,
        };
    }
    let wrong = correct_option.others();
    let index = rng.next_u32_range(0, 2) as usize;
    OpponentAnswer {
        answer: wrong[index.min(wrong.len() - 1)],
        is_correct: false,
    }
}
