//! Bounded document cache shared by the tasks of one extraction session
//!
//! Bodies are stored rather than parsed documents: parsed trees cannot cross
//! task boundaries, and re-parsing is cheap next to a network round trip.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Least-recently-used cache of fetched page bodies keyed by URL
pub struct DocumentCache {
    entries: Mutex<LruCache<String, Arc<str>>>,
}

impl DocumentCache {
    /// Creates a cache holding at most `capacity` documents (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns the cached body for a URL and marks it as recently used
    pub fn get(&self, url: &str) -> Option<Arc<str>> {
        self.lock().get(url).cloned()
    }

    /// Stores a body, evicting the least recently used entry when full
    pub fn insert(&self, url: String, body: Arc<str>) {
        self.lock().put(url, body);
    }

    /// Checks for a URL without touching its recency
    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    // A panic while holding the lock cannot leave the LRU half-updated
    fn lock(&self) -> MutexGuard<'_, LruCache<String, Arc<str>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
