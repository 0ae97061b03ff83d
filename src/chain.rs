use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    hash::{BuildHasher, Hash},
    mem,
};

use crate::error::TableError;
use crate::lengths::ChainLengths;
use crate::table::Table;

/// Bucket count for a table created with [`ChainTable::new`].
pub const DEFAULT_BUCKETS: usize = 101;

/// ChainTable manage a single instance of in-memory hash table using
/// [separate chaining][chaining]. Entries hashing to the same bucket are
/// kept in that bucket's chain, duplicates included.
///
/// [chaining]: https://en.wikipedia.org/wiki/Hash_table#Separate_chaining
#[derive(Clone)]
pub struct ChainTable<T>
where
    T: Hash + Eq,
{
    name: String,
    buckets: Vec<Vec<T>>,
    n_count: usize, // number of entries across all chains.
    hasher: RandomState,
}

/// Different ways to construct a new ChainTable instance.
impl<T> ChainTable<T>
where
    T: Hash + Eq,
{
    /// Create an empty instance of ChainTable, identified by `name`,
    /// with [`DEFAULT_BUCKETS`] buckets.
    pub fn new<S>(name: S) -> ChainTable<T>
    where
        S: AsRef<str>,
    {
        ChainTable::with_buckets(name, DEFAULT_BUCKETS)
    }

    /// Create an empty instance of ChainTable with at least `buckets`
    /// buckets. The count is rounded up to a prime.
    pub fn with_buckets<S>(name: S, buckets: usize) -> ChainTable<T>
    where
        S: AsRef<str>,
    {
        ChainTable {
            name: name.as_ref().to_string(),
            buckets: empty_buckets(next_prime(buckets)),
            n_count: Default::default(),
            hasher: RandomState::new(),
        }
    }

    /// Create a new instance of ChainTable and load it with values from
    /// `iter`. Duplicate values are kept.
    pub fn load_from<S, I>(name: S, iter: I) -> ChainTable<T>
    where
        S: AsRef<str>,
        I: Iterator<Item = T>,
    {
        let mut table = ChainTable::new(name);
        iter.for_each(|value| table.insert(value));
        table
    }
}

/// Maintenance API.
impl<T> ChainTable<T>
where
    T: Hash + Eq,
{
    /// Identify this instance. Applications can choose unique names while
    /// creating ChainTable instances.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Return the current number of buckets.
    #[inline]
    pub fn buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Return quickly with basic statisics, chain lengths are only
    /// gathered by [`ChainTable::validate`].
    pub fn stats(&self) -> Stats {
        Stats::new(self.n_count, self.buckets.len())
    }
}

/// Write operations on ChainTable instance.
impl<T> ChainTable<T>
where
    T: Hash + Eq,
{
    /// Add `value` to the chain of its bucket. Values already present are
    /// added again.
    pub fn insert(&mut self, value: T) {
        let index = self.bucket_of(&value);
        self.buckets[index].push(value);
        self.n_count += 1;
        if self.n_count > self.buckets.len() {
            self.rehash();
        }
    }

    /// Remove one occurrence of `value` and return it. If value is not
    /// present, then remove is effectively a no-op.
    pub fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_of(value);
        let chain = &mut self.buckets[index];
        let pos = chain.iter().position(|item| item.borrow() == value)?;
        self.n_count -= 1;
        Some(chain.swap_remove(pos))
    }

    /// Validate the table with following rules:
    ///
    /// * Every entry is chained under the bucket its hash selects.
    /// * Total length of all chains equals the entry count.
    ///
    /// Additionally return full statistics on the table. Refer to
    /// [`Stats`] for more information.
    pub fn validate(&self) -> Result<Stats, TableError> {
        let mut stats = Stats::new(self.n_count, self.buckets.len());
        let mut lengths = ChainLengths::new();
        let mut counted = 0;
        for (index, chain) in self.buckets.iter().enumerate() {
            for item in chain.iter() {
                let home = self.bucket_of(item);
                if home != index {
                    return Err(TableError::MisplacedEntry(index, home));
                }
            }
            counted += chain.len();
            lengths.sample(chain.len());
        }
        if counted != self.n_count {
            return Err(TableError::CountMismatch(counted, self.n_count));
        }
        stats.set_lengths(lengths);
        Ok(stats)
    }
}

/// Read operations on ChainTable instance.
impl<T> ChainTable<T>
where
    T: Hash + Eq,
{
    /// Check whether at least one occurrence of `value` is present.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let chain = &self.buckets[self.bucket_of(value)];
        chain.iter().any(|item| item.borrow() == value)
    }

    /// Return an iterator over all entries, in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buckets.iter().flat_map(|chain| chain.iter())
    }
}

impl<T> ChainTable<T>
where
    T: Hash + Eq,
{
    fn bucket_of<Q>(&self, value: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        (self.hasher.hash_one(value) % (self.buckets.len() as u64)) as usize
    }

    fn rehash(&mut self) {
        let size = next_prime(self.buckets.len() * 2);
        let old = mem::replace(&mut self.buckets, empty_buckets(size));
        for value in old.into_iter().flatten() {
            let index = self.bucket_of(&value);
            self.buckets[index].push(value);
        }
    }
}

impl<T> Table<T> for ChainTable<T>
where
    T: Hash + Eq,
{
    fn insert(&mut self, value: T) {
        ChainTable::insert(self, value)
    }

    fn contains(&self, value: &T) -> bool {
        ChainTable::contains(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        ChainTable::remove(self, value).is_some()
    }

    fn summary(&self) -> Option<String> {
        let summary = match self.validate() {
            Ok(stats) => match stats.lengths() {
                Some(lengths) => format!(
                    "{} entries in {} buckets, {}",
                    stats.entries(),
                    stats.buckets(),
                    lengths.summary()
                ),
                None => format!("{} entries, no buckets", stats.entries()),
            },
            Err(err) => format!("invalid table {}: {:?}", self.name, err),
        };
        Some(summary)
    }
}

#[cfg(test)]
impl<T> ChainTable<T>
where
    T: Hash + Eq,
{
    pub(crate) fn chains_mut(&mut self) -> &mut [Vec<T>] {
        &mut self.buckets
    }

    pub(crate) fn set_len(&mut self, n_count: usize) {
        self.n_count = n_count
    }
}

fn empty_buckets<T>(n: usize) -> Vec<Vec<T>> {
    (0..n).map(|_| Vec::new()).collect()
}

/// Smallest prime that is >= `n`, never less than 2.
pub(crate) fn next_prime(n: usize) -> usize {
    let mut n = n.max(2);
    if n > 2 && n % 2 == 0 {
        n += 1;
    }
    while !is_prime(n) {
        n += 2;
    }
    n
}

fn is_prime(n: usize) -> bool {
    match n {
        0 | 1 => false,
        2 | 3 => true,
        n if n % 2 == 0 => false,
        n => (3..)
            .step_by(2)
            .take_while(|i| i * i <= n)
            .all(|i| n % i != 0),
    }
}

/// Statistics on [`ChainTable`]. Serves two purpose:
///
/// * To get partial but quick statistics via [`ChainTable::stats`] method.
/// * To get full statisics via [`ChainTable::validate`] method.
#[derive(Default, Debug)]
pub struct Stats {
    entries: usize,
    buckets: usize,
    lengths: Option<ChainLengths>,
}

impl Stats {
    fn new(entries: usize, buckets: usize) -> Stats {
        Stats {
            entries,
            buckets,
            lengths: Default::default(),
        }
    }

    #[inline]
    fn set_lengths(&mut self, lengths: ChainLengths) {
        self.lengths = Some(lengths)
    }

    /// Return number entries in [`ChainTable`] instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return number of buckets in [`ChainTable`] instance.
    #[inline]
    pub fn buckets(&self) -> usize {
        self.buckets
    }

    /// Return entries per bucket. Rehashing keeps this at or below 1.0.
    ///
    /// ```
    /// use chain_bench::ChainTable;
    /// let mut table: ChainTable<u64> = ChainTable::new("myinstance");
    /// (0..50).for_each(|i| table.insert(i));
    ///
    /// // 50 entries over the default 101 buckets
    /// assert!((table.stats().load_factor() - 50.0 / 101.0).abs() < 1e-9);
    /// ```
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.entries as f64 / self.buckets as f64
    }

    /// Return [`ChainLengths`] statistics, available after validate().
    pub fn lengths(&self) -> Option<ChainLengths> {
        match &self.lengths {
            Some(lengths) if lengths.samples() > 0 => Some(lengths.clone()),
            _ => None,
        }
    }
}
