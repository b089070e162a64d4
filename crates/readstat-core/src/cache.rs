//! Bounded memoization with hit and miss counters.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use serde::Serialize;

/// Default number of entries kept per memoized function.
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

/// Counters reported by [`Memo::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to compute the value.
    pub misses: u64,
    /// Entries currently held.
    pub len: usize,
    /// Maximum number of entries.
    pub capacity: usize,
}

/// A least-recently-used cache for one function.
///
/// Values are computed outside the lock, so two threads missing on the same
/// key may both compute it. The last insert wins and both count as misses.
#[derive(Debug)]
pub struct Memo<K: Hash + Eq, V> {
    name: &'static str,
    entries: Mutex<LruCache<K, V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K: Hash + Eq, V: Clone> Memo<K, V> {
    /// Create a cache holding at most `capacity` entries (at least one).
    pub fn new(name: &'static str, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            name,
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn entries(&self) -> MutexGuard<'_, LruCache<K, V>> {
        // A panic inside `compute` never holds the lock, so the map is intact.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup(&self, key: &K) -> Option<V> {
        let found = self.entries().get(key).cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(cache = self.name, "cache miss");
        }
        found
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(&self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some(value) = self.lookup(&key) {
            return value;
        }
        let value = compute();
        self.entries().put(key, value.clone());
        value
    }

    /// Like [`Memo::get_or_insert_with`] for fallible computations.
    ///
    /// Errors are returned to the caller and not cached.
    pub fn get_or_try_insert_with<E>(
        &self,
        key: K,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.lookup(&key) {
            return Ok(value);
        }
        let value = compute()?;
        self.entries().put(key, value.clone());
        Ok(value)
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        self.entries().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len: entries.len(),
            capacity: entries.cap().get(),
        }
    }
}
