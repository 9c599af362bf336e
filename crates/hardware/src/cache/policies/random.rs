//! Random Replacement Policy.
//!
//! This policy evicts a uniformly chosen way from the set. Each instance owns
//! its generator (ChaCha8), seeded at construction, so a fixed seed reproduces
//! the exact victim stream. Sets of one cache share a seed but draw from
//! distinct ChaCha streams, keeping them independent of each other.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::Policy;

/// Random Policy state for one set.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    ways: usize,
    seed: u64,
    stream: u64,
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    /// Creates a new Random policy instance.
    ///
    /// # Arguments
    ///
    /// * `ways` - The associativity (number of ways) of the set.
    /// * `seed` - Generator seed.
    /// * `stream` - Generator stream; caches pass the set index.
    pub fn new(ways: usize, seed: u64, stream: u64) -> Self {
        Self {
            ways,
            seed,
            stream,
            rng: Self::generator(seed, stream),
        }
    }

    /// Seed this instance was built with.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    fn generator(seed: u64, stream: u64) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        rng
    }
}

impl PartialEq for RandomPolicy {
    fn eq(&self, other: &Self) -> bool {
        self.ways == other.ways
            && self.seed == other.seed
            && self.stream == other.stream
            && self.rng.get_word_pos() == other.rng.get_word_pos()
    }
}

impl Eq for RandomPolicy {}

impl Policy for RandomPolicy {
    fn ways(&self) -> usize {
        self.ways
    }

    /// Access history does not influence random replacement.
    fn access(&mut self, _way: usize) {}

    fn get_victim(&mut self) -> usize {
        self.rng.gen_range(0..self.ways)
    }

    /// Rewinds the generator to its construction state.
    fn reset(&mut self) {
        self.rng = Self::generator(self.seed, self.stream);
    }
}
