// core/src/cache.rs
//
// Memoizing wrapper around any Scorer. Repeated (query, candidate) pairs are
// answered from a bounded LRU cache instead of being rescored.

use crate::candidate::{Candidate, ScoredCandidate};
use crate::error::Result;
use crate::scorer::{EditDistanceScorer, Scorer};
use std::cell::RefCell;
use std::num::NonZeroUsize;
use tracing::trace;

/// Default number of cached `(query, candidate)` results.
pub const DEFAULT_CACHE_SIZE: usize = 1000;

type ScoreCache = lru::LruCache<(String, Candidate), ScoredCandidate, ahash::RandomState>;

/// Scorer wrapper with identical-input caching.
///
/// Keys are the raw query and candidate, so two queries that only differ in
/// case are cached separately even though they score the same. Errors are
/// passed through and never cached.
pub struct MemoizedScorer<S> {
    inner: S,
    cache: RefCell<ScoreCache>,
    cache_hits: RefCell<usize>,
    cache_misses: RefCell<usize>,
}

impl<S: Scorer> MemoizedScorer<S> {
    /// Wrap `inner` with a cache of the default capacity.
    pub fn new(inner: S) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_SIZE)
    }

    /// Wrap `inner` with a cache holding at most `capacity` results.
    /// A capacity of 0 falls back to the default.
    pub fn with_capacity(inner: S, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .or(NonZeroUsize::new(DEFAULT_CACHE_SIZE))
            .unwrap_or(NonZeroUsize::MIN);

        Self {
            inner,
            cache: RefCell::new(lru::LruCache::with_hasher(
                capacity,
                ahash::RandomState::new(),
            )),
            cache_hits: RefCell::new(0),
            cache_misses: RefCell::new(0),
        }
    }

    /// The wrapped scorer.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// `(hits, misses)` counted since construction or the last `clear_cache`.
    /// A hit is a score answered without calling the wrapped scorer.
    pub fn cache_stats(&self) -> (usize, usize) {
        (*self.cache_hits.borrow(), *self.cache_misses.borrow())
    }

    /// Share of scores served from the cache, in percent. `None` until the
    /// first score is requested.
    pub fn cache_hit_rate(&self) -> Option<f32> {
        let hits = *self.cache_hits.borrow();
        let misses = *self.cache_misses.borrow();
        let total = hits + misses;

        if total == 0 {
            None
        } else {
            Some((hits as f32 / total as f32) * 100.0)
        }
    }

    /// Number of `(query, candidate)` results currently held.
    pub fn cache_size(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Results held before the least recently used one is evicted.
    pub fn cache_capacity(&self) -> usize {
        self.cache.borrow().cap().get()
    }

    /// Drop all cached results and reset the statistics.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
        *self.cache_hits.borrow_mut() = 0;
        *self.cache_misses.borrow_mut() = 0;
    }
}

impl Default for MemoizedScorer<EditDistanceScorer> {
    fn default() -> Self {
        Self::new(EditDistanceScorer::new())
    }
}

impl<S: Scorer> Scorer for MemoizedScorer<S> {
    fn score(&self, query: &str, candidate: &Candidate) -> Result<ScoredCandidate> {
        let key = (query.to_string(), candidate.clone());

        // LRU get also refreshes the entry's recency
        if let Some(cached) = self.cache.borrow_mut().get(&key) {
            *self.cache_hits.borrow_mut() += 1;
            trace!(query, display_value = %cached.display_value, "score cache hit");
            return Ok(cached.clone());
        }

        *self.cache_misses.borrow_mut() += 1;
        trace!(query, "score cache miss");

        let scored = self.inner.score(query, candidate)?;
        self.cache.borrow_mut().put(key, scored.clone());
        Ok(scored)
    }
}
