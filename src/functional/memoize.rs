//! Result caching decorator
//!
//! A memoized function caches results under a [`MemoKey`], the canonical JSON
//! encoding of its full argument tuple. The encoding is order- and
//! type-sensitive: `(1, 2)` and `(2, 1)` are different keys, as are `1` and
//! `"1"`. Distinct values that encode to the same JSON share a key; for
//! example `f64::NAN` and `f64::INFINITY` both encode as `null`, so a cached
//! result for one is returned for the other.
//!
//! The wrapped function is assumed to be pure. A cache hit skips the call
//! entirely, including any side effects it would have had.

use super::Func;
use lru::LruCache;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{trace, warn};

/// Cache key derived from an argument tuple
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoKey(String);

impl MemoKey {
    /// Encode an argument tuple as its canonical key
    pub fn encode<A: Serialize + ?Sized>(args: &A) -> crate::Result<Self> {
        Ok(Self(serde_json::to_string(args)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

enum MemoStore<R> {
    Unbounded(HashMap<MemoKey, R>),
    Bounded(LruCache<MemoKey, R>),
}

impl<R: Clone> MemoStore<R> {
    fn get(&mut self, key: &MemoKey) -> Option<R> {
        match self {
            MemoStore::Unbounded(map) => map.get(key).cloned(),
            MemoStore::Bounded(cache) => cache.get(key).cloned(),
        }
    }

    fn insert(&mut self, key: MemoKey, value: R) {
        match self {
            MemoStore::Unbounded(map) => {
                map.insert(key, value);
            }
            MemoStore::Bounded(cache) => {
                cache.put(key, value);
            }
        }
    }

    fn len(&self) -> usize {
        match self {
            MemoStore::Unbounded(map) => map.len(),
            MemoStore::Bounded(cache) => cache.len(),
        }
    }
}

/// A function value bound to its own private result cache
pub struct Memoized<A, R> {
    inner: Func<A, R>,
    store: Arc<Mutex<MemoStore<R>>>,
}

impl<A, R> Clone for Memoized<A, R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            store: self.store.clone(),
        }
    }
}

impl<A, R> Memoized<A, R>
where
    A: Serialize + 'static,
    R: Clone + Send + 'static,
{
    /// Memoize `f` with a cache that is never evicted
    pub fn new(f: Func<A, R>) -> Self {
        Self {
            inner: f,
            store: Arc::new(Mutex::new(MemoStore::Unbounded(HashMap::new()))),
        }
    }

    /// Memoize `f`, keeping at most `capacity` least-recently-used results
    pub fn bounded(f: Func<A, R>, capacity: NonZeroUsize) -> Self {
        Self {
            inner: f,
            store: Arc::new(Mutex::new(MemoStore::Bounded(LruCache::new(capacity)))),
        }
    }

    /// Call through the cache
    pub fn call(&self, args: A) -> R {
        let key = match MemoKey::encode(&args) {
            Ok(key) => key,
            Err(e) => {
                warn!("Arguments cannot be encoded as a memo key, calling uncached: {e}");
                return (self.inner)(args);
            }
        };

        let cached = self.lock().get(&key);
        if let Some(value) = cached {
            trace!(key = key.as_str(), "memo hit");
            return value;
        }

        // The lock is released while the wrapped function runs so that a
        // memoized function may call itself.
        let value = (self.inner)(args);
        self.lock().insert(key, value.clone());
        value
    }

    /// Number of results currently cached
    pub fn cache_len(&self) -> usize {
        self.lock().len()
    }

    /// Convert into a plain function value sharing this cache
    pub fn into_func(self) -> Func<A, R> {
        Arc::new(move |args: A| self.call(args))
    }

    fn lock(&self) -> MutexGuard<'_, MemoStore<R>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Wrap `f` with an unbounded result cache
pub fn memoize<A, R>(f: Func<A, R>) -> Func<A, R>
where
    A: Serialize + 'static,
    R: Clone + Send + 'static,
{
    Memoized::new(f).into_func()
}

/// Wrap `f` with a least-recently-used cache of at most `capacity` results
pub fn memoize_bounded<A, R>(f: Func<A, R>, capacity: NonZeroUsize) -> Func<A, R>
where
    A: Serialize + 'static,
    R: Clone + Send + 'static,
{
    Memoized::bounded(f, capacity).into_func()
}
