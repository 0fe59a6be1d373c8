/// Seeded random source — deterministic uniform and weighted sampling.
///
/// Every generation call owns its own instance; two instances built
/// from the same seed produce identical draw sequences for identical
/// call sequences.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RandomError {
    #[error("cannot pick from an empty candidate sequence")]
    EmptyCandidates,
}

/// A deterministic RNG wrapper around [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A source seeded from process entropy. Not reproducible.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this source was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `[0, n)`. `n` must be positive.
    pub fn below(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }

    /// Uniform integer in `[lo, hi)`. `hi` must exceed `lo`.
    pub fn range(&mut self, lo: usize, hi: usize) -> usize {
        self.rng.gen_range(lo..hi)
    }

    /// Uniform float in `[0.0, 1.0)`.
    pub fn float(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Unweighted pick from a nonempty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, RandomError> {
        if items.is_empty() {
            return Err(RandomError::EmptyCandidates);
        }
        Ok(&items[self.below(items.len())])
    }

    /// Weighted pick from a nonempty slice.
    ///
    /// Draws uniformly in `[0, total_weight)` and walks cumulative
    /// weights in input order. Zero-weight items are unreachable; if
    /// every weight is zero the last item is returned.
    pub fn choose_weighted<'a, T>(
        &mut self,
        items: &'a [T],
        weight: impl Fn(&T) -> f32,
    ) -> Result<&'a T, RandomError> {
        if items.is_empty() {
            return Err(RandomError::EmptyCandidates);
        }

        let total: f32 = items.iter().map(&weight).sum();
        let draw = self.float() * total;

        let mut cumulative = 0.0;
        for item in items {
            cumulative += weight(item);
            if draw < cumulative {
                return Ok(item);
            }
        }

        // All weights zero (or float round-off at the top end).
        Ok(&items[items.len() - 1])
    }

    /// Bernoulli draw: true with probability `probability`.
    pub fn chance(&mut self, probability: f32) -> bool {
        self.float() < probability
    }
}
