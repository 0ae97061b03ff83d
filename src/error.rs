use std::{io, path::PathBuf};

use thiserror::Error;

/// TableError enumerates over all the ways a [`ChainTable`] can fail
/// validation.
///
/// [`ChainTable`]: crate::ChainTable
#[derive(Debug, PartialEq)]
pub enum TableError {
    /// Fatal case, an entry is chained under a bucket other than the
    /// one its hash selects. Carries (found-in, expected) bucket index.
    MisplacedEntry(usize, usize),
    /// Fatal case, the running entry count disagrees with the total
    /// length of all chains. Carries (counted, recorded).
    CountMismatch(usize, usize),
}

/// Error enumerates over failures that abort a benchmark run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open input {path:?}: {source}")]
    OpenInput { path: PathBuf, source: io::Error },
    #[error("cannot read input {path:?}: {source}")]
    ReadInput { path: PathBuf, source: io::Error },
    #[error("cannot print report: {0}")]
    Print(#[source] io::Error),
    #[error("cannot append to {path:?}: {source}")]
    WriteLog { path: PathBuf, source: io::Error },
}
