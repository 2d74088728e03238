use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use common::{Order, Sample};
use log::debug;

use crate::options::Options;
use crate::skiplist::SkipList;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Operation {
    Insertion,
    Search,
    Deletion,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Insertion, Operation::Search, Operation::Deletion];
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Insertion => f.write_str("insertion"),
            Operation::Search => f.write_str("search"),
            Operation::Deletion => f.write_str("deletion"),
        }
    }
}

/// Wall-clock cost of pushing one sample through a fresh list.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Timings {
    pub count: usize,
    pub insert_ms: f64,
    pub search_ms: f64,
    pub delete_ms: f64,
    /// Keys that were not found again after insertion. Zero for a correct list.
    pub misses: usize,
}

impl Timings {
    pub fn millis(&self, op: Operation) -> f64 {
        match op {
            Operation::Insertion => self.insert_ms,
            Operation::Search => self.search_ms,
            Operation::Deletion => self.delete_ms,
        }
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Inserts every key of `sample`, searches for each, then deletes each.
pub fn run(sample: &Sample, opts: Options) -> crate::Result<Timings> {
    let mut list = SkipList::with_options(opts)?;

    let start = Instant::now();
    for k in &sample.keys {
        list.insert(*k);
    }
    let insert_ms = elapsed_ms(start);

    let start = Instant::now();
    let mut misses = 0;
    for k in &sample.keys {
        if !list.search(k).found {
            misses += 1;
        }
    }
    let search_ms = elapsed_ms(start);

    let start = Instant::now();
    for k in &sample.keys {
        list.delete(k);
    }
    let delete_ms = elapsed_ms(start);

    debug!(
        "{} sample of {}: insert {:.3}ms search {:.3}ms delete {:.3}ms",
        sample.order,
        sample.len(),
        insert_ms,
        search_ms,
        delete_ms
    );
    Ok(Timings {
        count: sample.len(),
        insert_ms,
        search_ms,
        delete_ms,
        misses,
    })
}

pub fn report_path(dir: &Path, name: &str, op: Operation, order: Order) -> PathBuf {
    dir.join(format!("skiplist-{}-{}-{}.txt", name, op, order))
}

/// Writes one `"<count> <millis>"` line per row into a file per operation, returning the paths.
pub fn write_report(
    dir: &Path,
    name: &str,
    order: Order,
    rows: &[Timings],
) -> crate::Result<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(Operation::ALL.len());
    for op in Operation::ALL {
        let path = report_path(dir, name, op, order);
        let mut w = BufWriter::new(File::create(&path)?);
        for row in rows {
            writeln!(w, "{} {}", row.count, row.millis(op))?;
        }
        w.flush()?;
        paths.push(path);
    }
    Ok(paths)
}
