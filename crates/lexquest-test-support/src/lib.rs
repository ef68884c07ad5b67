//! Shared test doubles for the LexQuest engines.

mod clock;
mod content;
mod progress;
mod rng;

pub use clock::FixedClock;
pub use content::FailingContentRepository;
pub use progress::{FailingProgressStore, InMemoryProgressStore};
pub use rng::{MockRng, SequenceRng};
