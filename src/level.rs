use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of level slots the header, the tail and every `update` array can hold.
pub const LEVEL_CAPACITY: usize = 32;

/// Source of node levels, drawn once per successful insert.
///
/// Implementations should return a value in `0..=max_level`; the list clamps anything higher.
pub trait LevelGenerator {
    fn random_level(&mut self, max_level: usize) -> usize;
}

impl<F> LevelGenerator for F
where
    F: FnMut(usize) -> usize,
{
    fn random_level(&mut self, max_level: usize) -> usize {
        (*self)(max_level)
    }
}

/// Geometric levels: level `k` comes up with probability `p^k * (1 - p)`, truncated at the
/// list's maximum level.
#[derive(Debug, Clone)]
pub struct GeometricLevels {
    probability: f64,
    rand: StdRng,
}

impl GeometricLevels {
    pub fn new(probability: f64) -> Self {
        Self {
            probability,
            rand: StdRng::from_entropy(),
        }
    }

    pub fn seeded(probability: f64, seed: u64) -> Self {
        Self {
            probability,
            rand: StdRng::seed_from_u64(seed),
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl LevelGenerator for GeometricLevels {
    fn random_level(&mut self, max_level: usize) -> usize {
        let mut level = 0;
        while level < max_level && self.rand.gen::<f64>() < self.probability {
            level += 1;
        }
        level
    }
}
