//! Mutex-backed cache for callers off the main simulation thread.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::Duration;

use crate::TimedCache;

/// Thread-safe wrapper around [`TimedCache`].
///
/// All operations take `&self` and lock internally, so the cache can be
/// shared behind an `Arc`. Values are returned by clone rather than by
/// reference; a reference cannot outlive the lock.
///
/// [`get_or_compute`](Self::get_or_compute) holds the lock across the
/// supplier call, so the check-then-act sequence is atomic and concurrent
/// callers cannot race into duplicate computations of the same key. The
/// supplier must not touch this cache itself, or the reentrant lock will
/// deadlock.
#[derive(Debug)]
pub struct SharedTimedCache<K, V> {
    inner: Mutex<TimedCache<K, V>>,
}

impl<K: Eq + Hash, V: Clone> SharedTimedCache<K, V> {
    /// Create an empty cache whose entries live for `ttl` after each write.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(TimedCache::new(ttl)),
        }
    }

    /// The fixed time-to-live applied to every write.
    pub fn ttl(&self) -> Duration {
        self.lock().ttl()
    }

    /// Store `value` under `key`, overwriting any previous entry.
    pub fn insert(&self, key: K, value: V) {
        self.lock().insert(key, value);
    }

    /// Fetch a clone of the value for `key` if present and not expired.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().get(key).cloned()
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_compute(&self, key: K, supplier: impl FnOnce() -> V) -> V {
        self.lock().get_or_compute(key, supplier).clone()
    }

    /// Whether a valid entry exists for `key` (self-cleaning, like `get`).
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().contains_key(key)
    }

    /// Remove the entry for `key`, returning its value if one was stored.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().remove(key)
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Raw number of stored entries (same inexactness as [`TimedCache::len`]).
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the backing map is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove every expired entry now.
    pub fn purge_expired(&self) {
        self.lock().purge_expired();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TimedCache<K, V>> {
        // A poisoned lock means a supplier panicked mid-compute; the map
        // itself is still structurally sound, so keep serving it.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
