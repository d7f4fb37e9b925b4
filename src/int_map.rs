//! IntMap: `i32 -> V` map over the int-keyed table.

use crate::int_keyed_table::{Entry, IntKeyedTable, Keys};
use core::fmt;

/// A `HashMap<i32, V>` replacement for small, hot maps.
///
/// Sized for a few hundred entries. Not synchronized; wrap in a lock if
/// shared across threads.
#[derive(Clone)]
pub struct IntMap<V> {
    table: IntKeyedTable<V>,
}

impl<V> Default for IntMap<V> {
    fn default() -> Self {
        Self {
            table: IntKeyedTable::default(),
        }
    }
}

impl<V> IntMap<V> {
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
    pub fn put(&mut self, key: i32, value: V) -> Option<V> {
        let (entry, unused) = self.table.entry_with(key, value, |v| v);
        unused.map(|v| core::mem::replace(entry.payload_mut(), v))
    }

    /// Maps `key` to `value` only if `key` is absent. When `key` is present
    /// the existing value is returned and `value` is dropped.
    pub fn put_if_absent(&mut self, key: i32, value: V) -> Option<&V> {
        self.table
            .manage_entry(key, move || value)
            .map(|e| e.payload())
    }

    /// Returns the value for `key`, building it with `default` if absent.
    pub fn get_or_insert_with<F>(&mut self, key: i32, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let (entry, _) = self.table.entry_with(key, default, |f| f());
        entry.payload_mut()
    }

    pub fn get(&self, key: i32) -> Option<&V> {
        self.table.get_entry(key).map(Entry::payload)
    }

    pub fn get_mut(&mut self, key: i32) -> Option<&mut V> {
        self.table.get_entry_mut(key).map(Entry::payload_mut)
    }

    pub fn get_or_default<'a>(&'a self, key: i32, default: &'a V) -> &'a V {
        self.get(key).unwrap_or(default)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: i32) -> Option<V> {
        self.table.remove_entry(key).map(Entry::into_payload)
    }

    pub fn for_each<F>(&self, mut action: F)
    where
        F: FnMut(i32, &V),
    {
        self.table.for_each_entry(|e| action(e.key(), e.payload()));
    }

    pub fn for_each_key<F>(&self, action: F)
    where
        F: FnMut(i32),
    {
        self.table.for_each_key(action);
    }

    pub fn keys(&self) -> Keys<'_, V> {
        self.table.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, &V)> + '_ {
        self.table.iter().map(|e| (e.key(), e.payload()))
    }
}

impl<V: fmt::Debug> fmt::Debug for IntMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.table, f)
    }
}

impl<V> FromIterator<(i32, V)> for IntMap<V> {
    fn from_iter<I: IntoIterator<Item = (i32, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::new(iter.size_hint().0);
        for (k, v) in iter {
            map.put(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn put_and_replace_owned_values() {
        let mut m: IntMap<String> = IntMap::new(4);
        assert_eq!(m.put(1, "a".to_string()), None);
        assert_eq!(m.put(1, "b".to_string()), Some("a".to_string()));
        assert_eq!(m.get(1).map(String::as_str), Some("b"));
        assert_eq!(m.len(), 1);
    }

    /// Invariant: a rejected `put_if_absent` value is dropped without being stored.
    #[test]
    fn put_if_absent_drops_offered_value() {
        let mut m: IntMap<Rc<()>> = IntMap::new(4);
        let first = Rc::new(());
        let second = Rc::new(());
        assert!(m.put_if_absent(3, first.clone()).is_none());
        let kept = m.put_if_absent(3, second.clone()).expect("existing");
        assert!(Rc::ptr_eq(kept, &first));
        assert_eq!(Rc::strong_count(&second), 1);
        assert_eq!(Rc::strong_count(&first), 2);
    }

    #[test]
    fn get_or_insert_with_is_lazy() {
        let mut m: IntMap<Vec<i32>> = IntMap::new(4);
        let calls = Cell::new(0);
        m.get_or_insert_with(9, || {
            calls.set(calls.get() + 1);
            Vec::new()
        })
        .push(1);
        m.get_or_insert_with(9, || {
            calls.set(calls.get() + 1);
            Vec::new()
        })
        .push(2);
        assert_eq!(calls.get(), 1);
        assert_eq!(m.get(9), Some(&vec![1, 2]));
    }

    #[test]
    fn get_or_default_borrows_default() {
        let mut m: IntMap<&'static str> = IntMap::new(4);
        m.put(-5, "neg");
        let fallback = "none";
        assert_eq!(*m.get_or_default(-5, &fallback), "neg");
        assert_eq!(*m.get_or_default(5, &fallback), "none");
    }

    /// Invariant: `put` over a present key moves the new value in and hands
    /// back the old one without building a throwaway entry.
    #[test]
    fn put_replaces_in_place() {
        let token = Rc::new(());
        let mut m: IntMap<Rc<()>> = IntMap::new(3);
        for k in [0, 3, 6, 9] {
            assert!(m.put(k, token.clone()).is_none());
        }
        let buckets = m.table.bucket_count();
        let old = m.put(6, token.clone()).expect("replaced");
        assert!(Rc::ptr_eq(&old, &token));
        drop(old);
        assert_eq!(Rc::strong_count(&token), 5);
        assert_eq!(m.len(), 4);
        assert_eq!(m.table.bucket_count(), buckets, "replacing never grows");
    }
}
