//! IntSet: presence-only set of `i32` over the int-keyed table.

use crate::int_keyed_table::{IntKeyedTable, Keys};
use core::fmt;

/// A `HashSet<i32>` replacement for small, hot sets.
///
/// Bulk operations accept anything whose items convert into `Option<i32>`,
/// so plain values, optional values (absent ones are skipped) and other
/// `&IntSet`s all work:
///
/// ```
/// use int_keyed_map::IntSet;
///
/// let mut a = IntSet::new(4);
/// assert!(a.add_all([1, 2]));
/// assert!(a.add_all([Some(3), None]));
///
/// let b: IntSet = [2, 3].into_iter().collect();
/// assert!(a.remove_all(&b));
/// assert!(!a.remove_all(&b));
/// assert_eq!(a.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct IntSet {
    table: IntKeyedTable<()>,
}

impl IntSet {
    /// Creates a set tuned for `expected_size` values.
    pub fn new(expected_size: usize) -> Self {
        Self {
            table: IntKeyedTable::with_expected_size(expected_size),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn contains(&self, value: i32) -> bool {
        self.table.contains_key(value)
    }

    pub fn contains_key(&self, value: i32) -> bool {
        self.table.contains_key(value)
    }

    /// Adds `value`. Returns `true` if it was not already present.
    pub fn add(&mut self, value: i32) -> bool {
        self.table.manage_entry(value, || ()).is_none()
    }

    /// Adds every present value from `values`. Returns `true` if the set grew.
    pub fn add_all<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Option<i32>>,
    {
        let starting_len = self.len();
        for value in values.into_iter().filter_map(Into::<Option<i32>>::into) {
            self.add(value);
        }
        starting_len != self.len()
    }

    /// Removes `value`. Returns `true` if it was present.
    pub fn remove(&mut self, value: i32) -> bool {
        self.table.remove_entry(value).is_some()
    }

    /// Removes every present value from `values`. Returns `true` if the set shrank.
    pub fn remove_all<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Option<i32>>,
    {
        let starting_len = self.len();
        for value in values.into_iter().filter_map(Into::<Option<i32>>::into) {
            self.remove(value);
        }
        starting_len != self.len()
    }

    pub fn for_each_key<F>(&self, action: F)
    where
        F: FnMut(i32),
    {
        self.table.for_each_key(action);
    }

    pub fn keys(&self) -> Keys<'_, ()> {
        self.table.keys()
    }

    /// Current bucket count of the backing table.
    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }
}

impl<'a> IntoIterator for &'a IntSet {
    type Item = i32;
    type IntoIter = Keys<'a, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys()
    }
}

impl From<&[i32]> for IntSet {
    fn from(values: &[i32]) -> Self {
        let mut set = Self::new(values.len());
        set.add_all(values.iter().copied());
        set
    }
}

impl FromIterator<i32> for IntSet {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::new(iter.size_hint().0);
        set.add_all(iter);
        set
    }
}

/// Collects the present values; `None` items are skipped.
impl FromIterator<Option<i32>> for IntSet {
    fn from_iter<I: IntoIterator<Item = Option<i32>>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::new(iter.size_hint().0);
        set.add_all(iter);
        set
    }
}

impl fmt::Debug for IntSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_reports_novelty() {
        let mut s = IntSet::new(0);
        assert!(s.add(5));
        assert!(!s.add(5));
        assert_eq!(s.len(), 1);
    }

    /// Invariant: five values sharing a bucket grow a 3-bucket set and all
    /// stay members.
    #[test]
    fn colliding_values_survive_growth() {
        let mut s = IntSet::new(3);
        assert_eq!(s.bucket_count(), 3);
        for v in [0, 3, 6, 9, 12] {
            assert!(s.add(v));
        }
        assert_ne!(s.bucket_count(), 3);
        assert_eq!(s.len(), 5);
        for v in [0, 3, 6, 9, 12] {
            assert!(s.contains_key(v));
        }
    }

    #[test]
    fn optional_values_are_skipped() {
        let mut s = IntSet::new(4);
        assert!(!s.add_all([None::<i32>, None]));
        assert!(s.add_all(vec![Some(1), None, Some(2)]));
        assert!(!s.remove_all([None::<i32>]));
        assert!(s.remove_all([Some(2), None]));
        assert_eq!(s.keys().collect::<Vec<_>>(), vec![1]);
    }

    /// Invariant: collecting optional values keeps only the present ones.
    #[test]
    fn collect_skips_absent_values() {
        let s: IntSet = vec![Some(4), None, Some(-4), Some(4), None]
            .into_iter()
            .collect();
        assert_eq!(s.len(), 2);
        assert!(s.contains(4));
        assert!(s.contains(-4));

        let empty: IntSet = [None::<i32>; 3].into_iter().collect();
        assert!(empty.is_empty());
    }

    #[test]
    fn from_slice_and_debug() {
        let s = IntSet::from(&[7, 7, -7][..]);
        assert_eq!(s.len(), 2);
        let rendered = format!("{s:?}");
        assert!(rendered == "{7, -7}" || rendered == "{-7, 7}", "{rendered}");
    }
}
