//! Randomness capability used by key allocation
//!
//! The allocator never reaches for a global generator directly; it receives a
//! [`RandomSource`] so tests can substitute a deterministic one.

/// Source of uniformly distributed indexes.
pub trait RandomSource: Send + Sync {
    /// Returns an index in `0..upper`. `upper` is never zero.
    fn index(&self, upper: usize) -> usize;
}

/// Thread-local generator from `rand`, seeded from OS entropy and
/// periodically reseeded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    #[inline]
    fn index(&self, upper: usize) -> usize {
        rand::random_range(0..upper)
    }
}
