use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::snapshot::Snapshot;
use crate::store::SessionStore;

/// Default bound on live snapshots.
pub const DEFAULT_CAPACITY: usize = 1_024;

struct Entry {
    snapshot: Snapshot,
    /// Monotonic access stamp; smallest = least recently used.
    touched: AtomicU64,
}

/// In-memory session store backed by a concurrent hash map.
///
/// Per-key operations are atomic (sharded locking in the map). The store is
/// bounded: inserting a new key at capacity first evicts the entry with the
/// oldest access stamp. Eviction scans are serialized by a mutex so
/// concurrent puts cannot over-evict; gets and puts on existing keys never
/// take it.
pub struct InMemorySessionStore {
    entries: DashMap<String, Entry>,
    clock: AtomicU64,
    capacity: usize,
    evict_lock: Mutex<()>,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store bounded to `capacity` snapshots (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            clock: AtomicU64::new(0),
            capacity: capacity.max(1),
            evict_lock: Mutex::new(()),
        }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    fn evict_lru(&self) {
        let _guard = self.evict_lock.lock();
        while self.entries.len() >= self.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|e| e.value().touched.load(Ordering::Relaxed))
                .map(|e| e.key().clone());
            match oldest {
                Some(key) => {
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn put(&self, id: String, snapshot: Snapshot) {
        if !self.entries.contains_key(&id) && self.entries.len() >= self.capacity {
            self.evict_lru();
        }
        let entry = Entry {
            snapshot,
            touched: AtomicU64::new(self.tick()),
        };
        self.entries.insert(id, entry);
    }

    fn get(&self, id: &str) -> Option<Snapshot> {
        let entry = self.entries.get(id)?;
        entry.touched.store(self.tick(), Ordering::Relaxed);
        Some(entry.snapshot.clone())
    }

    fn evict(&self, id: &str) -> bool {
        self.entries.remove(id).is_some()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(dataset: &str, seeds: Vec<u64>) -> Snapshot {
        Snapshot::new(dataset, "IC", "WC", seeds)
    }

    #[test]
    fn get_on_never_stored_id_is_none() {
        let store = InMemorySessionStore::new();
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn put_then_get_round_trips() {
        let store = InMemorySessionStore::new();
        store.put("r1".into(), snap("karate", vec![1, 2]));

        let got = store.get("r1").unwrap();
        assert_eq!(got.dataset_id, "karate");
        assert_eq!(got.initial_nodes, vec![1, 2]);
    }

    #[test]
    fn put_to_one_id_never_bleeds_into_another() {
        let store = InMemorySessionStore::new();
        store.put("r1".into(), snap("karate", vec![1]));
        store.put("r2".into(), snap("facebook", vec![2]));

        assert_eq!(store.get("r1").unwrap().dataset_id, "karate");
        assert_eq!(store.get("r2").unwrap().dataset_id, "facebook");
        assert!(store.get("r3").is_none());
    }

    #[test]
    fn overwrite_replaces_snapshot() {
        let store = InMemorySessionStore::new();
        store.put("r1".into(), snap("karate", vec![1]));
        store.put("r1".into(), snap("karate", vec![7, 8]));

        assert_eq!(store.get("r1").unwrap().initial_nodes, vec![7, 8]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn capacity_overflow_evicts_least_recently_used() {
        let store = InMemorySessionStore::with_capacity(2);
        store.put("a".into(), snap("d", vec![1]));
        store.put("b".into(), snap("d", vec![2]));

        // Touch "a" so "b" becomes the LRU entry.
        store.get("a");
        store.put("c".into(), snap("d", vec![3]));

        assert_eq!(store.len(), 2);
        assert!(store.get("a").is_some());
        assert!(store.get("b").is_none());
        assert!(store.get("c").is_some());
    }

    #[test]
    fn overwrite_at_capacity_does_not_evict() {
        let store = InMemorySessionStore::with_capacity(2);
        store.put("a".into(), snap("d", vec![1]));
        store.put("b".into(), snap("d", vec![2]));
        store.put("a".into(), snap("d", vec![9]));

        assert_eq!(store.len(), 2);
        assert!(store.get("b").is_some());
        assert_eq!(store.get("a").unwrap().initial_nodes, vec![9]);
    }

    #[test]
    fn evict_removes_entry() {
        let store = InMemorySessionStore::new();
        store.put("a".into(), snap("d", vec![1]));

        assert!(store.evict("a"));
        assert!(!store.evict("a"));
        assert!(store.get("a").is_none());
        assert!(store.is_empty());
    }
}
