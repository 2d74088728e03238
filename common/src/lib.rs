pub mod samples;

pub use samples::{sample_sizes, random, sequential, Order, Sample};
