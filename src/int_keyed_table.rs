//! IntKeyedTable: separate-chaining table over `i32` keys with arena-backed chains.
//!
//! Entries are stored in a `SlotMap` arena and chained through arena keys.
//! A bucket slot holds the arena key of its chain head; every entry holds the
//! arena key of its successor. Growth only rewrites those links, it never
//! moves an entry out of the arena.

use crate::error::{Error, Result};
use core::fmt;
use core::iter::FusedIterator;
use slotmap::{DefaultKey, SlotMap};

/// Longest chain accepted before an insert grows the table.
pub(crate) const MAX_CHAIN_LEN: usize = 4;

/// Entry count at which growth switches from doubling to 1.5x.
pub(crate) const LARGE_TABLE_THRESHOLD: usize = 33_000;

const LOAD_FACTOR: f64 = 0.85;

const MIN_BUCKETS: usize = 3;

/// Maps a raw capacity hint to a bucket count: scale by the load factor, then
/// force the result odd by stepping down.
pub(crate) fn massage_size(size: usize) -> usize {
    let scaled = (size as f64 * LOAD_FACTOR) as usize;
    if scaled & 1 == 0 {
        scaled.saturating_sub(1)
    } else {
        scaled
    }
}

/// Bucket count used when growing a table that currently holds `len` entries.
pub(crate) fn next_bucket_count(len: usize) -> usize {
    let raw = if len < LARGE_TABLE_THRESHOLD {
        len << 1
    } else {
        len + (len >> 1)
    };
    massage_size(raw).max(MIN_BUCKETS)
}

/// A chain node: an immutable key, the payload chosen by the container, and
/// the link to the next node in the same bucket.
#[derive(Clone)]
pub struct Entry<P> {
    key: i32,
    next: Option<DefaultKey>,
    payload: P,
}

impl<P> Entry<P> {
    fn new(key: i32, payload: P) -> Self {
        Self {
            key,
            next: None,
            payload,
        }
    }

    #[inline]
    pub fn key(&self) -> i32 {
        self.key
    }

    #[inline]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    #[inline]
    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    #[inline]
    pub fn into_payload(self) -> P {
        self.payload
    }
}

impl<P: fmt::Debug> fmt::Debug for Entry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("payload", &self.payload)
            .finish()
    }
}

/// The table engine shared by `IntIntMap`, `IntMap` and `IntSet`.
///
/// The engine never overwrites payloads; it only creates entries for absent
/// keys (via a caller-supplied factory), hands out existing entries, and
/// unlinks entries on removal. Replacement policy belongs to the containers
/// built on top of it.
///
/// Not internally synchronized. Shared use across threads needs an external
/// lock around every call, reads included, since growth relinks every chain.
#[derive(Clone)]
pub struct IntKeyedTable<P> {
    buckets: Vec<Option<DefaultKey>>,
    slots: SlotMap<DefaultKey, Entry<P>>, // arena; its len is the entry count
}

impl<P> Default for IntKeyedTable<P> {
    fn default() -> Self {
        Self::with_expected_size(0)
    }
}

impl<P> IntKeyedTable<P> {
    /// Creates a table tuned for roughly `expected_size` entries.
    pub fn with_expected_size(expected_size: usize) -> Self {
        let bucket_count = massage_size(expected_size).max(MIN_BUCKETS);
        log::trace!(
            "Creating int-keyed table with {bucket_count} buckets (expected size {expected_size})"
        );
        Self {
            buckets: vec![None; bucket_count],
            slots: SlotMap::with_capacity_and_key(expected_size),
        }
    }

    #[inline]
    fn bucket_index(&self, key: i32) -> usize {
        (key & 0x7FFF_FFFF) as usize % self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current number of bucket slots. Only changes when an insert grows the table.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Drops every entry at once. The bucket count is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.buckets.fill(None);
    }

    pub fn contains_key(&self, key: i32) -> bool {
        self.find(key).is_some()
    }

    fn find(&self, key: i32) -> Option<DefaultKey> {
        let mut cursor = self.buckets[self.bucket_index(key)];
        while let Some(k) = cursor {
            let entry = &self.slots[k];
            if entry.key == key {
                return Some(k);
            }
            cursor = entry.next;
        }
        None
    }

    pub fn get_entry(&self, key: i32) -> Option<&Entry<P>> {
        self.find(key).map(|k| &self.slots[k])
    }

    pub fn get_entry_mut(&mut self, key: i32) -> Option<&mut Entry<P>> {
        let k = self.find(key)?;
        self.slots.get_mut(k)
    }

    /// Upsert primitive.
    ///
    /// If `key` is absent, `factory` is called once to build the payload, the
    /// new entry is linked at the tail of its bucket's chain, and `None` is
    /// returned. If `key` is present, the existing entry is returned untouched
    /// and `factory` is never called.
    ///
    /// Appending to a chain that already holds `MAX_CHAIN_LEN` entries grows
    /// the table first and then retries once without growth, so the retry may
    /// still leave an over-long chain.
    pub fn manage_entry<F>(&mut self, key: i32, factory: F) -> Option<&mut Entry<P>>
    where
        F: FnOnce() -> P,
    {
        match self.find_or_insert(key, factory, |f| f(), true) {
            (k, Some(_)) => self.slots.get_mut(k),
            (_, None) => None,
        }
    }

    /// Like `manage_entry`, but always returns the entry for `key`. `arg` is
    /// consumed by `factory` when the key is absent and handed back untouched
    /// when it is present.
    pub(crate) fn entry_with<A, F>(
        &mut self,
        key: i32,
        arg: A,
        factory: F,
    ) -> (&mut Entry<P>, Option<A>)
    where
        F: FnOnce(A) -> P,
    {
        let (k, unused) = self.find_or_insert(key, arg, factory, true);
        (&mut self.slots[k], unused)
    }

    fn find_or_insert<A, F>(
        &mut self,
        key: i32,
        arg: A,
        factory: F,
        allow_growth: bool,
    ) -> (DefaultKey, Option<A>)
    where
        F: FnOnce(A) -> P,
    {
        let idx = self.bucket_index(key);
        let Some(head) = self.buckets[idx] else {
            let k = self.slots.insert(Entry::new(key, factory(arg)));
            self.buckets[idx] = Some(k);
            return (k, None);
        };

        let mut tail = head;
        let mut chain_len = 1;
        loop {
            let entry = &self.slots[tail];
            if entry.key == key {
                return (tail, Some(arg));
            }
            match entry.next {
                Some(next) => {
                    tail = next;
                    chain_len += 1;
                }
                None => break,
            }
        }

        if allow_growth && chain_len >= MAX_CHAIN_LEN {
            self.grow();
            return self.find_or_insert(key, arg, factory, false);
        }

        let k = self.slots.insert(Entry::new(key, factory(arg)));
        self.slots[tail].next = Some(k);
        (k, None)
    }

    /// Unlinks and returns the entry for `key`. The returned entry is detached:
    /// its successor link is cleared.
    pub fn remove_entry(&mut self, key: i32) -> Option<Entry<P>> {
        let idx = self.bucket_index(key);
        let mut prev: Option<DefaultKey> = None;
        let mut cursor = self.buckets[idx];
        while let Some(k) = cursor {
            let entry = &self.slots[k];
            let next = entry.next;
            if entry.key == key {
                match prev {
                    None => self.buckets[idx] = next,
                    Some(p) => self.slots[p].next = next,
                }
                let mut removed = self.slots.remove(k)?;
                removed.next = None;
                return Some(removed);
            }
            prev = cursor;
            cursor = next;
        }
        None
    }

    /// Rebuilds the bucket array for the current entry count and relinks every
    /// entry, tail-appending within its new bucket.
    fn grow(&mut self) {
        let new_count = next_bucket_count(self.slots.len());
        let old = core::mem::replace(&mut self.buckets, vec![None; new_count]);
        log::trace!(
            "Growing int-keyed table from {} to {new_count} buckets ({} entries)",
            old.len(),
            self.slots.len()
        );

        for head in old {
            let mut cursor = head;
            while let Some(k) = cursor {
                cursor = self.slots[k].next.take();
                self.relink(k);
            }
        }
    }

    fn relink(&mut self, k: DefaultKey) {
        let idx = self.bucket_index(self.slots[k].key);
        let Some(head) = self.buckets[idx] else {
            self.buckets[idx] = Some(k);
            return;
        };
        let mut tail = head;
        while let Some(next) = self.slots[tail].next {
            tail = next;
        }
        self.slots[tail].next = Some(k);
    }

    /// Visits every entry, bucket by bucket, each chain head to tail.
    pub fn for_each_entry<F>(&self, mut action: F)
    where
        F: FnMut(&Entry<P>),
    {
        for entry in self.iter() {
            action(entry);
        }
    }

    pub fn for_each_key<F>(&self, mut action: F)
    where
        F: FnMut(i32),
    {
        for entry in self.iter() {
            action(entry.key);
        }
    }

    /// Iterator over entries in traversal order. Order is unspecified and
    /// changes when the table grows.
    pub fn iter(&self) -> Iter<'_, P> {
        Iter {
            table: self,
            bucket: 0,
            cursor: None,
            remaining: self.slots.len(),
        }
    }

    pub fn keys(&self) -> Keys<'_, P> {
        Keys { inner: self.iter() }
    }

    /// Walks every chain and counts the entries reached.
    #[cfg(test)]
    pub(crate) fn chained_len(&self) -> usize {
        let mut seen = std::collections::HashSet::new();
        for &head in &self.buckets {
            let mut cursor = head;
            while let Some(k) = cursor {
                assert!(seen.insert(k), "entry linked from two places");
                cursor = self.slots[k].next;
            }
        }
        seen.len()
    }

    #[cfg(test)]
    pub(crate) fn longest_chain(&self) -> usize {
        self.buckets
            .iter()
            .map(|&head| {
                let mut n = 0;
                let mut cursor = head;
                while let Some(k) = cursor {
                    n += 1;
                    cursor = self.slots[k].next;
                }
                n
            })
            .max()
            .unwrap_or(0)
    }
}

impl<P: fmt::Debug> fmt::Debug for IntKeyedTable<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|e| (e.key, &e.payload)))
            .finish()
    }
}

/// Iterator over the entries of an `IntKeyedTable`.
pub struct Iter<'a, P> {
    table: &'a IntKeyedTable<P>,
    bucket: usize,
    cursor: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, P> Iterator for Iter<'a, P> {
    type Item = &'a Entry<P>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(k) = self.cursor {
                let entry = &self.table.slots[k];
                self.cursor = entry.next;
                self.remaining -= 1;
                return Some(entry);
            }
            if self.bucket >= self.table.buckets.len() {
                return None;
            }
            self.cursor = self.table.buckets[self.bucket];
            self.bucket += 1;
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<P> ExactSizeIterator for Iter<'_, P> {}

impl<P> FusedIterator for Iter<'_, P> {}

/// Single-pass key sequence over an `IntKeyedTable`.
///
/// The sequence borrows the table, so the table cannot be modified while
/// it is alive.
pub struct Keys<'a, P> {
    inner: Iter<'a, P>,
}

impl<P> Keys<'_, P> {
    /// True while at least one key remains.
    pub fn has_next(&self) -> bool {
        self.inner.remaining > 0
    }

    /// Next key, or `Error::ExhaustedIterator` once every key was yielded.
    pub fn next_key(&mut self) -> Result<i32> {
        self.inner
            .next()
            .map(Entry::key)
            .ok_or(Error::ExhaustedIterator)
    }
}

impl<P> Iterator for Keys<'_, P> {
    type Item = i32;

    #[inline]
    fn next(&mut self) -> Option<i32> {
        self.inner.next().map(Entry::key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<P> ExactSizeIterator for Keys<'_, P> {}

impl<P> FusedIterator for Keys<'_, P> {}
