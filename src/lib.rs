mod error;
mod key;
mod level;
pub mod measure;
mod node;
mod options;
pub mod render;
pub mod shell;
mod skiplist;

pub use error::Error;
pub use key::Key;
pub use level::{GeometricLevels, LevelGenerator, LEVEL_CAPACITY};
pub use node::NodeId;
pub use options::{Options, DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY};
pub use skiplist::{Iter, NodeRef, PathStep, SearchResult, SkipList};

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! ensure {
    ($cond:expr,$err:expr $(,)?) => {
        if !$cond {
            return Err($err);
        }
    };
}
