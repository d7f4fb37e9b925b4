//! IntIntMap: `i32 -> i32` map over the int-keyed table.

use crate::int_keyed_table::{Entry, IntKeyedTable, Keys};
use core::fmt;

/// A `HashMap<i32, i32>` replacement for small, hot maps.
///
/// Sized for a few hundred entries. Not synchronized; wrap in a lock if
/// shared across threads.
#[derive(Clone, Default)]
pub struct IntIntMap {
    table: IntKeyedTable<i32>,
}

impl IntIntMap {
    /// Creates a map tuned for `expected_size` entries.
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

    pub fn contains_key(&self, key: i32) -> bool {
        self.table.contains_key(key)
    }

    /// Maps `key` to `value`, returning the value it replaced.
    pub fn put(&mut self, key: i32, value: i32) -> Option<i32> {
        let existing = self.table.manage_entry(key, || value)?;
        Some(core::mem::replace(existing.payload_mut(), value))
    }

    /// Maps `key` to `value` only if `key` is absent. Returns the value
    /// already present, if any, which is left unchanged.
    pub fn put_if_absent(&mut self, key: i32, value: i32) -> Option<i32> {
        self.table.manage_entry(key, || value).map(|e| *e.payload())
    }

    pub fn get(&self, key: i32) -> Option<i32> {
        self.table.get_entry(key).map(|e| *e.payload())
    }

    pub fn get_or_default(&self, key: i32, default: i32) -> i32 {
        self.get(key).unwrap_or(default)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: i32) -> Option<i32> {
        self.table.remove_entry(key).map(Entry::into_payload)
    }

    pub fn for_each<F>(&self, mut action: F)
    where
        F: FnMut(i32, i32),
    {
        self.table.for_each_entry(|e| action(e.key(), *e.payload()));
    }

    pub fn for_each_key<F>(&self, action: F)
    where
        F: FnMut(i32),
    {
        self.table.for_each_key(action);
    }

    pub fn keys(&self) -> Keys<'_, i32> {
        self.table.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.table.iter().map(|e| (e.key(), *e.payload()))
    }

    /// Current bucket count of the backing table.
    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }
}

impl fmt::Debug for IntIntMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.table, f)
    }
}

impl FromIterator<(i32, i32)> for IntIntMap {
    fn from_iter<I: IntoIterator<Item = (i32, i32)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::new(iter.size_hint().0);
        for (k, v) in iter {
            map.put(k, v);
        }
        map
    }
}
