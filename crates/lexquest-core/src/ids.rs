//! Strongly typed identifiers.
//!
//! Catalog identifiers are integers assigned by the content author; user
//! identifiers are issued by the external account layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies an authenticated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " {}"), self.0)
            }
        }
    };
}

catalog_id!(
    /// Identifies a question, either within a level or in the duel pool.
    QuestionId,
    "question"
);
catalog_id!(
    /// Identifies a level.
    LevelId,
    "level"
);
catalog_id!(
    /// Identifies a scenario chain.
    ScenarioId,
    "scenario"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_display_with_kind_prefix() {
        assert_eq!(QuestionId(7).to_string(), "question 7");
        assert_eq!(LevelId(2).to_string(), "level 2");
        assert_eq!(ScenarioId(3).to_string(), "scenario 3");
    }

    #[test]
    fn test_catalog_ids_serialize_as_bare_integers() {
        let json = serde_json::to_string(&QuestionId(42)).unwrap();
        assert_eq!(json, "42");
    }
}
