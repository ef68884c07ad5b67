//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a real RNG. In tests, a seeded or scripted
//! implementation is injected so opponent draws and shuffles are repeatable.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::DomainError;

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;
}

/// Production RNG backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct StdRandom(StdRng);

impl StdRandom {
    /// Creates an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Creates an RNG with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for StdRandom {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        self.0.random_range(min..=max)
    }

    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Shuffles `items` in place with a Fisher–Yates pass driven by `rng`.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn DeterministicRng) {
    for i in (1..items.len()).rev() {
        let upper = u32::try_from(i).unwrap_or(u32::MAX);
        let j = rng.next_u32_range(0, upper) as usize;
        items.swap(i, j);
    }
}

/// Runs `draw` against a shared RNG.
///
/// The lock is released before returning, so callers can await afterwards.
///
/// # Errors
///
/// Returns `DomainError::CollaboratorUnavailable` if the lock is poisoned.
pub fn with_rng<T>(
    rng: &Mutex<dyn DeterministicRng + Send>,
    draw: impl FnOnce(&mut dyn DeterministicRng) -> T,
) -> Result<T, DomainError> {
    let mut guard = rng.lock().map_err(|_| {
        DomainError::CollaboratorUnavailable("random source lock poisoned".to_owned())
    })?;
    Ok(draw(&mut *guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_repeatable() {
        let mut a = StdRandom::seeded(7);
        let mut b = StdRandom::seeded(7);

        for _ in 0..16 {
            assert_eq!(a.next_u32_range(0, 100), b.next_u32_range(0, 100));
        }
    }

    #[test]
    fn test_next_f64_stays_in_unit_interval() {
        let mut rng = StdRandom::seeded(11);

        for _ in 0..1_000 {
            let sample = rng.next_f64();
            assert!((0.0..1.0).contains(&sample));
        }
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = StdRandom::seeded(3);
        let mut items: Vec<u32> = (0..20).collect();

        shuffle(&mut items, &mut rng);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_with_rng_draws_from_shared_source() {
        let rng: Mutex<StdRandom> = Mutex::new(StdRandom::seeded(5));
        let mut expected = StdRandom::seeded(5);

        let value = with_rng(&rng, |r| r.next_u32_range(0, 1_000)).unwrap();

        assert_eq!(value, expected.next_u32_range(0, 1_000));
    }

    #[test]
    fn test_shuffle_of_empty_slice_is_a_no_op() {
        let mut rng = StdRandom::seeded(3);
        let mut items: Vec<u32> = Vec::new();

        shuffle(&mut items, &mut rng);

        assert!(items.is_empty());
    }
}
