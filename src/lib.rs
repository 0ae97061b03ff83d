mod bench;
mod chain;
mod dataset;
mod error;
mod lengths;
mod logger;
mod report;
mod table;

pub use crate::bench::{run, run_all, Operation, Run, Sample};
pub use crate::chain::{ChainTable, Stats, DEFAULT_BUCKETS};
pub use crate::dataset::{
    cmp_ignore_case, load_names, read_names, Arrangement, Lines, Orderings,
};
pub use crate::error::{Error, TableError};
pub use crate::lengths::ChainLengths;
pub use crate::logger::initialize_logger;
pub use crate::report::{Report, ANALYSIS_FILE};
pub use crate::table::Table;

#[cfg(test)]
mod bench_test;
