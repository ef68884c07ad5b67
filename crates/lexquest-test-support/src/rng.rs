//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use lexquest_core::rng::DeterministicRng;

/// A no-op RNG that always returns `min` for `next_u32_range` and `0.0` for
/// `next_f64`. With any positive accuracy the opponent always answers
/// correctly, and shuffles leave the first element in last place.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that returns values from predetermined sequences. Panics if a
/// sequence is exhausted. Used in tests that need specific opponent draws.
#[derive(Debug, Default)]
pub struct SequenceRng {
    integers: Vec<u32>,
    integer_index: usize,
    floats: Vec<f64>,
    float_index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` returning `values` from `next_u32_range`.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            integers: values,
            ..Self::default()
        }
    }

    /// Create a new `SequenceRng` returning `values` from `next_f64`.
    #[must_use]
    pub fn floats(values: Vec<f64>) -> Self {
        Self {
            floats: values,
            ..Self::default()
        }
    }

    /// Adds a `next_f64` sequence to an existing RNG.
    #[must_use]
    pub fn with_floats(mut self, values: Vec<f64>) -> Self {
        self.floats = values;
        self.float_index = 0;
        self
    }

    /// Number of `next_f64` values handed out so far.
    #[must_use]
    pub fn floats_drawn(&self) -> usize {
        self.float_index
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, _min: u32, _max: u32) -> u32 {
        let val = self.integers[self.integer_index];
        self.integer_index += 1;
        val
    }

    fn next_f64(&mut self) -> f64 {
        let val = self.floats[self.float_index];
        self.float_index += 1;
        val
    }
}
