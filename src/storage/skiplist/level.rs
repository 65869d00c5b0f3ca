// Level generation
//
// Each draw below the level up probability promotes the node one more level, so P(level >= i) = p^i.
// The result is clamped to max_level. Nothing else depends on the exact sequence of draws, any rng
// producing uniform floats in [0, 1) gives the same expected shape.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[inline]
pub fn random_level<R: Rng + ?Sized>(rng: &mut R, max_level: usize, probability: f64) -> usize {
    let mut level = 0;
    while level < max_level && rng.random::<f64>() < probability {
        level += 1;
    }
    level
}

pub(crate) struct LevelGenerator {
    rng: StdRng,
    max_level: usize,
    probability: f64,
}

impl LevelGenerator {
    pub(crate) fn new(max_level: usize, probability: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            rng,
            max_level,
            probability,
        }
    }

    #[inline]
    pub(crate) fn next_level(&mut self) -> usize {
        random_level(&mut self.rng, self.max_level, self.probability)
    }
}
