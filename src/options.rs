use crate::level::LEVEL_CAPACITY;
use crate::{ensure, Error};

pub const DEFAULT_MAX_LEVEL: usize = 15;
pub const DEFAULT_PROBABILITY: f64 = 0.5;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Options {
    /// Highest level index a node may reach. With fan-out `p` the list stays efficient up to
    /// roughly `(1/p)^max_level` keys; past that, draws are capped rather than rejected.
    ///
    /// Must be below [`LEVEL_CAPACITY`].
    pub max_level: usize,
    /// Chance that a node's tower grows one more level. Must lie strictly between 0 and 1.
    pub probability: f64,
    /// Seed for the level generator. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
            seed: None,
        }
    }
}

impl Options {
    pub fn max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> crate::Result<()> {
        ensure!(
            self.probability > 0.0 && self.probability < 1.0,
            Error::InvalidProbability(self.probability)
        );
        ensure!(
            self.max_level < LEVEL_CAPACITY,
            Error::InvalidMaxLevel(self.max_level, LEVEL_CAPACITY)
        );
        Ok(())
    }
}
