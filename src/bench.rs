use std::{
    fmt,
    hint::black_box,
    time::{Duration, Instant},
};

use log::{debug, log_enabled, Level};

use crate::dataset::{Arrangement, Orderings};
use crate::table::Table;

/// Bulk operations timed against a table, in the order they run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Insert,
    Search,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Insert, Operation::Search, Operation::Delete];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Insert => "Insert",
            Operation::Search => "Search",
            Operation::Delete => "Delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Wall-clock time for one bulk operation over one arrangement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub arrangement: Arrangement,
    pub op: Operation,
    pub elapsed: Duration,
}

impl Sample {
    #[inline]
    pub fn secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Timings of insert, search and delete over one arrangement, all
/// against the same table.
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    arrangement: Arrangement,
    insert: Duration,
    search: Duration,
    delete: Duration,
    hits: usize, // membership probes that found their value.
}

impl Run {
    /// Construct a run from already measured timings.
    pub fn new(arrangement: Arrangement, insert: Duration, search: Duration, delete: Duration) -> Run {
        Run {
            arrangement,
            insert,
            search,
            delete,
            hits: Default::default(),
        }
    }

    #[inline]
    pub fn arrangement(&self) -> Arrangement {
        self.arrangement
    }

    /// Return the time taken by `op` in this run.
    pub fn elapsed(&self, op: Operation) -> Duration {
        match op {
            Operation::Insert => self.insert,
            Operation::Search => self.search,
            Operation::Delete => self.delete,
        }
    }

    /// Return the number of search probes that reported a hit.
    #[inline]
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Return all three samples, in the order they were measured.
    pub fn samples(&self) -> [Sample; 3] {
        Operation::ALL.map(|op| Sample {
            arrangement: self.arrangement,
            op,
            elapsed: self.elapsed(op),
        })
    }
}

/// Time bulk insert, then bulk search, then bulk delete of `data` against
/// `table`, each phase measured as a single span. `table` is consumed, it
/// is expected to start out empty.
pub fn run<'a, T>(arrangement: Arrangement, data: &'a [String], mut table: T) -> Run
where
    T: Table<&'a str>,
{
    let start = Instant::now();
    for name in data {
        table.insert(name.as_str());
    }
    let insert = start.elapsed();
    if log_enabled!(Level::Debug) {
        if let Some(summary) = table.summary() {
            debug!("{} after insert: {}", arrangement, summary);
        }
    }

    let mut hits = 0;
    let start = Instant::now();
    for name in data {
        if table.contains(&name.as_str()) {
            hits += 1;
        }
    }
    let search = start.elapsed();
    let hits = black_box(hits);

    let start = Instant::now();
    for name in data {
        table.remove(&name.as_str());
    }
    let delete = start.elapsed();

    debug!(
        "{}: {} names, insert {:?} search {:?} ({} hits) delete {:?}",
        arrangement,
        data.len(),
        insert,
        search,
        hits,
        delete
    );

    Run {
        arrangement,
        insert,
        search,
        delete,
        hits,
    }
}

/// Run every arrangement in [`Arrangement::ALL`] order, building a fresh
/// table for each one with `make_table`.
pub fn run_all<'a, T, F>(orderings: &'a Orderings, mut make_table: F) -> Vec<Run>
where
    T: Table<&'a str>,
    F: FnMut(Arrangement) -> T,
{
    Arrangement::ALL
        .iter()
        .map(|&arrangement| {
            let table = make_table(arrangement);
            run(arrangement, orderings.get(arrangement), table)
        })
        .collect()
}
