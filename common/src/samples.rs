use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Order {
    Sequential,
    Random,
}

impl Display for Order {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Order::Sequential => f.write_str("sequential"),
            Order::Random => f.write_str("random"),
        }
    }
}

/// A batch of keys fed to a list in one measurement round.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Sample {
    pub order: Order,
    pub keys: Vec<i64>,
}

impl Sample {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Sizes `start, start + step, ..` up to and including `end`.
///
/// A zero `step` yields only `start`.
pub fn sample_sizes(start: usize, end: usize, step: usize) -> Vec<usize> {
    if start > end {
        return Vec::new();
    }
    if step == 0 {
        return vec![start];
    }
    (start..=end).step_by(step).collect()
}

/// Keys `1..=size` in ascending order.
pub fn sequential(size: usize) -> Sample {
    Sample {
        order: Order::Sequential,
        keys: (1..=size as i64).collect(),
    }
}

/// `size` keys drawn uniformly from `1..=size` with replacement, so repeats are expected and
/// exercise rejected inserts and missed deletes. Seeded, so a run can be repeated.
pub fn random(size: usize, seed: u64) -> Sample {
    let mut rng = StdRng::seed_from_u64(seed);
    let keys = (0..size)
        .map(|_| rng.gen_range(1..=size as i64))
        .collect();
    Sample {
        order: Order::Random,
        keys,
    }
}
