use std::io::{self, BufRead, Write};

use log::warn;
use skipset::shell::{Command, Shell, HELP};
use skipset::{Options, SkipList};
use structopt::StructOpt;

/// Interactive skip list shell, started with the keys 15, 25, 35, 45 and 55.
#[derive(Debug, StructOpt)]
struct Opt {
    /// Highest level a node may reach
    #[structopt(short, long, default_value = "15")]
    max_level: usize,
    /// Chance a node grows one more level, within (0, 1)
    #[structopt(short, long, default_value = "0.5")]
    probability: f64,
    /// Seed for node levels and the `random` command
    #[structopt(short, long)]
    seed: Option<u64>,
}

impl Opt {
    fn options(&self) -> Options {
        let opts = Options::default()
            .max_level(self.max_level)
            .probability(self.probability);
        match self.seed {
            Some(seed) => opts.seed(seed),
            None => opts,
        }
    }
}

fn main() -> skipset::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opt = Opt::from_args();
    let opts = opt.options();
    let mut shell = Shell::with_sample(SkipList::with_options(opts)?, opts.seed);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}\n\n{}", HELP, shell.list())?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let cmd = match line.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        };
        let outcome = shell.execute(cmd);
        if cmd == Command::Quit {
            break;
        }
        if let Some(picture) = outcome.picture {
            writeln!(out, "{}", picture)?;
        } else if cmd == Command::Help || cmd == Command::Stats {
            writeln!(out, "{}", outcome.message)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skipset::{DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY};

    #[test]
    fn test_opt_defaults_match_options() {
        let opt = Opt::from_iter_safe(["skipset"]).unwrap();
        assert_eq!(opt.max_level, DEFAULT_MAX_LEVEL);
        assert_eq!(opt.probability, DEFAULT_PROBABILITY);
        assert_eq!(opt.options(), Options::default());
    }

    #[test]
    fn test_opt_flags() {
        let opt = Opt::from_iter_safe(["skipset", "--seed=5", "--max-level", "4", "-p", "0.25"])
            .unwrap();
        assert_eq!(opt.options(), Options::default().seed(5).max_level(4).probability(0.25));
        assert!(Opt::from_iter_safe(["skipset", "--seed", "x"]).is_err());
    }
}
