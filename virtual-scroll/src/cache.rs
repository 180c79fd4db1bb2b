use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::types::sanitize_extent;

#[doc(hidden)]
pub trait CacheKey: Hash + Eq + Clone {}
impl<K: Hash + Eq + Clone> CacheKey for K {}

#[derive(Clone, Copy, Debug)]
struct Entry {
    height: f64,
    stamp: u64,
}

/// A bounded map from item key to measured height, evicting the least recently used entry.
///
/// Measurements keyed by identity survive reorders and count changes, so a list that scrolls
/// back to an item does not need to fall back to the estimate. The cache is owned by the caller
/// (typically one per list); nothing here is process-wide.
#[derive(Clone, Debug)]
pub struct MeasurementCache<K> {
    capacity: usize,
    next_stamp: u64,
    entries: HashMap<K, Entry>,
    recency: BTreeMap<u64, K>,
}

impl<K: CacheKey> MeasurementCache<K> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            next_stamp: 0,
            entries: HashMap::new(),
            recency: BTreeMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the cached height and marks the entry as most recently used.
    pub fn get(&mut self, key: &K) -> Option<f64> {
        let stamp = self.bump();
        let entry = self.entries.get_mut(key)?;
        self.recency.remove(&entry.stamp);
        entry.stamp = stamp;
        self.recency.insert(stamp, key.clone());
        Some(entry.height)
    }

    /// Returns the cached height without touching recency.
    pub fn peek(&self, key: &K) -> Option<f64> {
        self.entries.get(key).map(|e| e.height)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts or refreshes a measurement.
    ///
    /// Returns the entry evicted to stay within capacity, if any. With a capacity of 0 the
    /// inserted entry itself is returned.
    pub fn put(&mut self, key: K, height: f64) -> Option<(K, f64)> {
        let height = sanitize_extent(height);
        let stamp = self.bump();
        if let Some(entry) = self.entries.get_mut(&key) {
            self.recency.remove(&entry.stamp);
            entry.height = height;
            entry.stamp = stamp;
            self.recency.insert(stamp, key);
            return None;
        }

        self.entries.insert(key.clone(), Entry { height, stamp });
        self.recency.insert(stamp, key);
        if self.entries.len() <= self.capacity {
            return None;
        }

        let (_, oldest) = self.recency.pop_first()?;
        let evicted = self.entries.remove(&oldest)?;
        vtrace!(capacity = self.capacity, "MeasurementCache: evicted oldest entry");
        Some((oldest, evicted.height))
    }

    pub fn evict(&mut self, key: &K) -> Option<f64> {
        let entry = self.entries.remove(key)?;
        self.recency.remove(&entry.stamp);
        Some(entry.height)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    /// Iterates entries from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.recency
            .values()
            .filter_map(|k| self.entries.get(k).map(|e| (k, e.height)))
    }

    fn bump(&mut self) -> u64 {
        let stamp = self.next_stamp;
        self.next_stamp = self.next_stamp.wrapping_add(1);
        stamp
    }
}
