//! Seeded randomness for dealing and the opening flip.
//!
//! Every random decision a [`Game`](crate::Game) makes goes through one
//! [`GameRng`]: the stack shuffle on reset and the coin that picks the first
//! attacker. Reusing a seed replays the same deal.
//!
//! ```
//! use rust_durak::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.coin_flip(), b.coin_flip());
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Golden-ratio increment separating consecutive derived seeds.
const DERIVE_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// ChaCha8 stream tagged with the seed it started from.
#[derive(Clone, Debug)]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
    derived: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
            derived: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive a fresh generator for the next deal.
    ///
    /// The n-th call on a given seed always returns the same stream,
    /// regardless of how much of this stream has been consumed.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.derived += 1;
        Self::new(self.seed.wrapping_add(self.derived.wrapping_mul(DERIVE_STEP)))
    }

    /// Heads or tails.
    pub fn coin_flip(&mut self) -> bool {
        self.gen_bool(0.5)
    }

    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.stream.gen_bool(probability)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.stream);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_flips() {
        let mut left = GameRng::new(42);
        let mut right = GameRng::new(42);
        let flips: Vec<bool> = (0..64).map(|_| left.coin_flip()).collect();
        let again: Vec<bool> = (0..64).map(|_| right.coin_flip()).collect();
        assert_eq!(flips, again);
    }

    #[test]
    fn test_shuffle_permutes() {
        let mut rng = GameRng::new(42);
        let sorted: Vec<u32> = (1..=20).collect();
        let mut cards = sorted.clone();

        rng.shuffle(&mut cards);
        assert_ne!(cards, sorted);

        cards.sort_unstable();
        assert_eq!(cards, sorted);
    }

    #[test]
    fn test_fork_ignores_consumption() {
        let mut fresh = GameRng::new(42);
        let mut used = GameRng::new(42);
        for _ in 0..10 {
            used.coin_flip();
        }

        let first = fresh.fork();
        assert_eq!(first.seed(), used.fork().seed());
        assert_ne!(fresh.fork().seed(), first.seed());
    }

    #[test]
    fn test_fork_deals_differently() {
        let mut rng = GameRng::new(7);
        let mut next = rng.fork();

        let mut a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();
        rng.shuffle(&mut a);
        next.shuffle(&mut b);
        assert_ne!(a, b);
    }
}
