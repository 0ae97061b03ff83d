/// Minimal capability the timing runner needs from a hash table.
///
/// Implementations must accept duplicate values on insert and take out a
/// single occurrence on remove.
pub trait Table<T> {
    fn insert(&mut self, value: T);

    fn contains(&self, value: &T) -> bool;

    /// Return whether an occurrence of `value` was removed.
    fn remove(&mut self, value: &T) -> bool;

    /// Optional one line description of the table's internal shape,
    /// logged between timed phases.
    fn summary(&self) -> Option<String> {
        None
    }
}
