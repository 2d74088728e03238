use std::path::PathBuf;

use common::{random, sample_sizes, sequential, Order};
use log::{info, warn};
use skipset::measure::{run, write_report};
use skipset::Options;
use structopt::StructOpt;

/// Times insert, search and delete over growing samples and writes one report per operation.
#[derive(Debug, StructOpt)]
struct Opt {
    /// Smallest sample size
    start: usize,
    /// Largest sample size
    end: usize,
    /// Size increment between samples
    step: usize,
    /// Directory the reports are written to
    #[structopt(parse(from_os_str), default_value = "measurements")]
    out_dir: PathBuf,
    /// Name embedded in report file names
    #[structopt(default_value = "setup")]
    name: String,
}

fn main() -> skipset::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opt = Opt::from_args();
    std::fs::create_dir_all(&opt.out_dir)?;

    let sizes = sample_sizes(opt.start, opt.end, opt.step);
    let opts = Options::default();
    for order in [Order::Sequential, Order::Random] {
        let mut rows = Vec::with_capacity(sizes.len());
        for (round, size) in sizes.iter().enumerate() {
            let sample = match order {
                Order::Sequential => sequential(*size),
                Order::Random => random(*size, round as u64),
            };
            let timings = run(&sample, opts)?;
            if timings.misses > 0 {
                warn!("{} keys went missing in a sample of {}", timings.misses, size);
            }
            rows.push(timings);
        }
        for path in write_report(&opt.out_dir, &opt.name, order, &rows)? {
            info!("wrote {}", path.display());
        }
    }
    Ok(())
}
