#[allow(unused_imports)]
use crate::ChainTable;

/// ChainLengths calculates minimum, maximum, average and percentile of
/// chain lengths across the buckets of a [`ChainTable`].
#[derive(Clone, Debug, Default)]
pub struct ChainLengths {
    samples: usize,
    min: usize,
    max: usize,
    total: usize,
    lengths: Vec<u64>, // lengths[n] = number of chains holding n entries
}

impl ChainLengths {
    pub(crate) fn new() -> ChainLengths {
        Default::default()
    }

    pub(crate) fn sample(&mut self, length: usize) {
        if self.samples == 0 || length < self.min {
            self.min = length
        }
        if length > self.max {
            self.max = length
        }
        self.samples += 1;
        self.total += length;
        if self.lengths.len() <= length {
            self.lengths.resize(length + 1, 0);
        }
        self.lengths[length] += 1;
    }

    /// Return number of buckets sampled.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Return the shortest chain, empty buckets included.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Return the longest chain.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Return the average chain length, rounded down.
    pub fn mean(&self) -> usize {
        match self.samples {
            0 => 0,
            n => self.total / n,
        }
    }

    /// Return the tail of the distribution as (percentile, length) pairs.
    /// A pair is reported for every chain length at which the share of
    /// buckets covered so far reaches 90% or more, rounded down.
    pub fn percentiles(&self) -> Vec<(u8, usize)> {
        let samples = self.samples as u64;
        self.lengths
            .iter()
            .enumerate()
            .scan(0_u64, |covered, (length, &n)| {
                *covered += n;
                Some((length, n, *covered))
            })
            .filter(|&(_, n, _)| n > 0)
            .map(|(length, _, covered)| ((covered * 100 / samples) as u8, length))
            .filter(|&(perc, _)| perc >= 90)
            .collect()
    }

    /// One line summary, useful in logs.
    pub fn summary(&self) -> String {
        let ps: Vec<String> = self
            .percentiles()
            .into_iter()
            .map(|(p, n)| format!("p{}={}", p, n))
            .collect();
        format!(
            "chains (min, avg, max): {:?} {}",
            (self.min, self.mean(), self.max),
            ps.join(" ")
        )
    }
}
