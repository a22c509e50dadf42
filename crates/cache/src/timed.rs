//! Self-cleaning timed cache for the main simulation thread.

use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// Key-value cache where every entry expires a fixed TTL after it was written.
///
/// Expiry is write-time: reads never refresh an entry's deadline. Expired
/// entries are evicted lazily, as a side effect of the `get`/`contains_key`
/// call that finds them stale; [`len`](TimedCache::len) may therefore
/// overcount until the stale entries are touched (or
/// [`purge_expired`](TimedCache::purge_expired) is called).
///
/// Not internally synchronized; see [`SharedTimedCache`](crate::SharedTimedCache)
/// for multi-threaded use.
#[derive(Debug)]
pub struct TimedCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    ttl: Duration,
}

impl<K: Eq + Hash, V> TimedCache<K, V> {
    /// Create an empty cache whose entries live for `ttl` after each write.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// The fixed time-to-live applied to every write.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store `value` under `key`, unconditionally overwriting any previous
    /// entry and stamping a fresh `now + ttl` deadline.
    pub fn insert(&mut self, key: K, value: V) {
        self.entries.insert(key, CacheEntry::new(value, self.ttl));
    }

    /// Fetch the value for `key` if present and not expired.
    ///
    /// Finding an expired entry removes it before returning `None`.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => return None,
        };
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    ///
    /// `supplier` runs at most once per call and only when no valid entry
    /// exists; its result is always cached, whatever it is (callers that need
    /// "absent" as a computed outcome use `V = Option<T>` and get `None`
    /// cached like any other value). Supplier panics propagate untouched.
    pub fn get_or_compute(&mut self, key: K, supplier: impl FnOnce() -> V) -> &V {
        let now = Instant::now();
        let ttl = self.ttl;
        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired(now) {
                    occupied.insert(CacheEntry::new(supplier(), ttl));
                }
                &occupied.into_mut().value
            }
            Entry::Vacant(vacant) => &vacant.insert(CacheEntry::new(supplier(), ttl)).value,
        }
    }

    /// Whether a valid (non-expired) entry exists for `key`.
    ///
    /// Shares `get`'s self-cleaning side effect: a stale entry found here is
    /// removed.
    pub fn contains_key<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Remove the entry for `key`, returning its value if one was stored.
    ///
    /// Expiry is not consulted: a logically expired but not-yet-pruned value
    /// is still returned.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.remove(key).map(|entry| entry.value)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Raw number of stored entries.
    ///
    /// May include entries that are already expired but have not been touched
    /// by a `get`/`contains_key` since their deadline passed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the backing map is empty (same inexactness as [`len`](Self::len)).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every expired entry now, making [`len`](Self::len) exact.
    pub fn purge_expired(&mut self) {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::trace!(removed, remaining = self.entries.len(), "purged expired cache entries");
        }
    }
}
