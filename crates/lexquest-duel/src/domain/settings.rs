//! Duel tuning knobs.

use lexquest_core::error::DomainError;

/// Opponent accuracy used when nothing else is configured.
pub const DEFAULT_OPPONENT_ACCURACY: f64 = 0.8;

/// Question count used when a start request does not name one.
pub const DEFAULT_QUESTION_COUNT: u32 = 5;

/// Validated duel settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuelSettings {
    opponent_accuracy: f64,
    default_question_count: u32,
}

impl DuelSettings {
    /// Creates settings after checking their ranges.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `opponent_accuracy` is outside
    /// `[0, 1]` or `default_question_count` is zero.
    pub fn new(opponent_accuracy: f64, default_question_count: u32) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&opponent_accuracy) {
            return Err(DomainError::Validation(format!(
                "opponent accuracy must lie in [0, 1], got {opponent_accuracy}"
            )));
        }
        if default_question_count == 0 {
            return Err(DomainError::Validation(
                "default question count must be at least 1".to_owned(),
            ));
        }
        Ok(Self {
            opponent_accuracy,
            default_question_count,
        })
    }

    /// Probability that the opponent answers correctly.
    #[must_use]
    pub fn opponent_accuracy(&self) -> f64 {
        self.opponent_accuracy
    }

    /// Questions per duel when the request leaves it open.
    #[must_use]
    pub fn default_question_count(&self) -> u32 {
        self.default_question_count
    }
}

impl Default for DuelSettings {
    fn default() -> Self {
        Self {
            opponent_accuracy: DEFAULT_OPPONENT_ACCURACY,
            default_question_count: DEFAULT_QUESTION_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = DuelSettings::default();

        assert!((settings.opponent_accuracy() - 0.8).abs() < f64::EPSILON);
        assert_eq!(settings.default_question_count(), 5);
    }

    #[test]
    fn test_rejects_accuracy_outside_unit_interval() {
        assert!(matches!(
            DuelSettings::new(1.5, 5),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            DuelSettings::new(-0.1, 5),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            DuelSettings::new(f64::NAN, 5),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_zero_question_count() {
        assert!(matches!(
            DuelSettings::new(0.5, 0),
            Err(DomainError::Validation(_))
        ));
    }
}
