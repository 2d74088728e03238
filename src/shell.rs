use std::str::FromStr;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::level::LevelGenerator;
use crate::render::render;
use crate::skiplist::SkipList;
use crate::{ensure, Error};

/// Keys the shell starts out with.
pub const SAMPLE_KEYS: [i64; 5] = [15, 25, 35, 45, 55];

pub const HELP: &str = "\
commands:
  insert <n>   add a key
  search <n>   look a key up and show the path taken
  delete <n>   remove a key
  random       insert a random key in 1..=100
  clear        remove every key
  show         draw the list
  stats        node count and current level
  help         this text
  quit         leave";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    Insert(i64),
    Search(i64),
    Delete(i64),
    Random,
    Clear,
    Show,
    Stats,
    Help,
    Quit,
}

fn parse_key(word: Option<&str>, line: &str) -> crate::Result<i64> {
    let word = word.ok_or_else(|| Error::InvalidCommand(line.to_string()))?;
    word.parse::<i64>()
        .map_err(|_| Error::InvalidKey(word.to_string()))
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> crate::Result<Self> {
        let mut words = line.split_whitespace();
        let name = words
            .next()
            .ok_or_else(|| Error::InvalidCommand(line.to_string()))?;
        let cmd = match name.to_ascii_lowercase().as_str() {
            "insert" | "i" => Command::Insert(parse_key(words.next(), line)?),
            "search" | "s" => Command::Search(parse_key(words.next(), line)?),
            "delete" | "d" => Command::Delete(parse_key(words.next(), line)?),
            "random" => Command::Random,
            "clear" => Command::Clear,
            "show" => Command::Show,
            "stats" => Command::Stats,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(Error::InvalidCommand(line.to_string())),
        };
        ensure!(
            words.next().is_none(),
            Error::InvalidCommand(line.to_string())
        );
        Ok(cmd)
    }
}

/// What a command produced: a one-line message, and a drawing when the list should be shown.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Outcome {
    pub message: String,
    pub picture: Option<String>,
}

impl Outcome {
    fn message(message: String) -> Self {
        Self {
            message,
            picture: None,
        }
    }
}

/// Drives one list from parsed commands.
///
/// `random` draws from the shell's own generator, seeded from `seed` when one is given so a
/// scripted session replays the same keys.
pub struct Shell<G> {
    list: SkipList<i64, G>,
    rand: StdRng,
}

impl<G: LevelGenerator> Shell<G> {
    pub fn new(list: SkipList<i64, G>, seed: Option<u64>) -> Self {
        let rand = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { list, rand }
    }

    /// Inserts [`SAMPLE_KEYS`].
    pub fn with_sample(list: SkipList<i64, G>, seed: Option<u64>) -> Self {
        let mut shell = Self::new(list, seed);
        for k in SAMPLE_KEYS {
            shell.list.insert(k);
        }
        info!(
            "Skip list initialized with sample data: {}",
            SAMPLE_KEYS.map(|k| k.to_string()).join(", ")
        );
        shell
    }

    pub fn list(&self) -> &SkipList<i64, G> {
        &self.list
    }

    pub fn execute(&mut self, cmd: Command) -> Outcome {
        let outcome = match cmd {
            Command::Insert(k) => self.insert(k),
            Command::Search(k) => {
                let result = self.list.search(&k);
                let message = if result.found {
                    format!("Found {} in {} steps", k, result.steps())
                } else {
                    format!("{} not found ({} steps)", k, result.steps())
                };
                Outcome {
                    message,
                    picture: Some(render(&self.list).highlight(&result).to_string()),
                }
            }
            Command::Delete(k) => {
                let message = if self.list.delete(&k) {
                    format!("Deleted {} successfully", k)
                } else {
                    format!("Value {} not found for deletion", k)
                };
                self.drawn(message)
            }
            Command::Random => {
                let k = self.rand.gen_range(1..=100);
                self.insert(k)
            }
            Command::Clear => {
                self.list.clear();
                self.drawn("Cleared all nodes".to_string())
            }
            Command::Show => self.drawn(self.stats()),
            Command::Stats => Outcome::message(self.stats()),
            Command::Help => Outcome::message(HELP.to_string()),
            Command::Quit => Outcome::message("bye".to_string()),
        };
        info!("{}", outcome.message);
        outcome
    }

    fn insert(&mut self, k: i64) -> Outcome {
        let message = if self.list.insert(k) {
            format!("Inserted {} successfully", k)
        } else {
            format!("Value {} already exists", k)
        };
        self.drawn(message)
    }

    fn drawn(&self, message: String) -> Outcome {
        Outcome {
            message,
            picture: Some(self.list.to_string()),
        }
    }

    fn stats(&self) -> String {
        format!("nodes: {}, level: {}", self.list.len(), self.list.level())
    }
}
