use std::collections::BTreeSet;
use std::fmt::Debug;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A single mutation applied to both a list under test and the reference model.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Op {
    Insert(i64),
    Delete(i64),
}

/// Produces `len` operations over keys in `0..key_space`, roughly two inserts per delete.
pub fn random_ops(seed: u64, len: usize, key_space: i64) -> Vec<Op> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            let key = rng.gen_range(0..key_space);
            if rng.gen_ratio(2, 3) {
                Op::Insert(key)
            } else {
                Op::Delete(key)
            }
        })
        .collect()
}

/// Ordered-set reference the skip list is checked against.
#[derive(Debug, Default, Clone)]
pub struct Model {
    keys: BTreeSet<i64>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `op` and returns whether it changed the set.
    pub fn apply(&mut self, op: Op) -> bool {
        match op {
            Op::Insert(k) => self.keys.insert(k),
            Op::Delete(k) => self.keys.remove(&k),
        }
    }

    pub fn contains(&self, key: i64) -> bool {
        self.keys.contains(&key)
    }

    pub fn keys(&self) -> Vec<i64> {
        self.keys.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

pub fn assert_strictly_ascending<T: Ord + Debug>(items: &[T]) {
    for pair in items.windows(2) {
        assert!(pair[0] < pair[1], "out of order: {:?} then {:?}", pair[0], pair[1]);
    }
}

pub fn assert_same_keys(actual: &[i64], model: &Model) {
    pretty_assertions::assert_eq!(actual, model.keys().as_slice());
}
