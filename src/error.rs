use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("io error {0}")]
    IOError(#[from] io::Error),
    #[error("probability must be within (0, 1), got {0}")]
    InvalidProbability(f64),
    #[error("max level {0} exceeds level capacity {1}")]
    InvalidMaxLevel(usize, usize),
    #[error("invalid command {0:?}")]
    InvalidCommand(String),
    #[error("invalid key {0:?}")]
    InvalidKey(String),
}
