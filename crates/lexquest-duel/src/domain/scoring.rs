//! Points awarded to the player per duel submission.

/// Returns the points for a submission.
///
/// `attempt_number` is the 1-based count of submissions for the question in
/// the current duel, including this one.
#[must_use]
pub const fn points(attempt_number: u32, is_correct: bool) -> u32 {
    if !is_correct {
        return 0;
    }
    match attempt_number {
        1 => 3,
        2 => 2,
        3 => 1,
        _ => 0,
    }
}

/// Points for a correct first attempt; the most any question can yield.
pub const MAX_POINTS_PER_QUESTION: u32 = points(1, true);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incorrect_answers_never_score() {
        for attempt in 1..=10 {
            assert_eq!(points(attempt, false), 0);
        }
    }

    #[test]
    fn test_correct_answers_lose_a_point_per_retry() {
        assert_eq!(points(1, true), 3);
        assert_eq!(points(2, true), 2);
        assert_eq!(points(3, true), 1);
        assert_eq!(points(4, true), 0);
        assert_eq!(points(50, true), 0);
    }

    #[test]
    fn test_max_points_matches_first_attempt() {
        assert_eq!(MAX_POINTS_PER_QUESTION, 3);
    }
}
