//! Remote-state cache
//!
//! Holds the last value fetched per [`QueryKey`] and refetches on access
//! once a key has been invalidated.
//!
//! - **Single flight**: concurrent `fetch` calls for one key share a single
//!   pending load.
//! - **Supersession**: a load only stores its result while it is still the
//!   key's pending load. Invalidation, `set_data`, `remove` and `clear` all
//!   detach the pending load, so a superseded response never overwrites
//!   fresher state, even after the key was dropped and recreated.
//! - **Errors**: a failed load records its message and leaves any previous
//!   value in place.
//!
//! There is no eviction; keys live until [`QueryCache::remove`] or
//! [`QueryCache::clear`].

mod key;

pub use key::QueryKey;

use crate::{ClientError, ClientResult};
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

type AnyValue = Arc<dyn Any + Send + Sync>;
type LoadResult = Result<AnyValue, Arc<ClientError>>;
type SharedLoad = Shared<BoxFuture<'static, LoadResult>>;

struct InFlight {
    load_id: u64,
    future: SharedLoad,
}

#[derive(Default)]
struct Entry {
    value: Option<AnyValue>,
    stale: bool,
    generation: u64,
    inflight: Option<InFlight>,
    last_error: Option<String>,
}

/// Snapshot of one key's state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStatus {
    pub has_data: bool,
    pub is_stale: bool,
    pub is_fetching: bool,
    /// Message of the most recent failed load, cleared by the next success
    pub last_error: Option<String>,
    pub generation: u64,
}

/// Keyed store of remote state, shared across views via `Clone`
#[derive(Clone, Default)]
pub struct QueryCache {
    entries: Arc<DashMap<QueryKey, Entry>>,
    next_load: Arc<AtomicU64>,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("keys", &self.entries.len())
            .finish()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key` if fresh, otherwise load it
    ///
    /// `loader` is only called when no load for `key` is pending; callers
    /// arriving while one is pending await that one instead. It runs on the
    /// first poll of the load, outside any lock on the cache.
    pub async fn fetch<T, F, Fut>(&self, key: &QueryKey, loader: F) -> ClientResult<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let load = {
            let mut entry = self.entries.entry(key.clone()).or_default();
            if let Some(value) = entry.value.as_ref().filter(|_| !entry.stale) {
                tracing::trace!(%key, "Cache hit");
                return downcast(key, value);
            }

            match &entry.inflight {
                Some(inflight) => {
                    tracing::debug!(%key, "Joining pending load");
                    inflight.future.clone()
                }
                None => {
                    let load_id = self.next_load.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(%key, load_id, generation = entry.generation, "Loading");

                    let entries = Arc::clone(&self.entries);
                    let store_key = key.clone();
                    let future = async move {
                        let result: LoadResult = loader()
                            .await
                            .map(|value| Arc::new(value) as AnyValue)
                            .map_err(Arc::new);
                        store(&entries, &store_key, load_id, &result);
                        result
                    }
                    .boxed()
                    .shared();

                    entry.inflight = Some(InFlight {
                        load_id,
                        future: future.clone(),
                    });
                    future
                }
            }
        };

        match load.await {
            Ok(value) => downcast(key, &value),
            Err(err) => Err(ClientError::from_shared(err)),
        }
    }

    /// Mark every key under `prefix` stale and supersede its pending load
    ///
    /// Keys that are already stale with nothing pending are left alone.
    /// Returns how many keys were newly invalidated.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut count = 0;
        for mut entry in self.entries.iter_mut() {
            if !entry.key().starts_with(prefix) {
                continue;
            }
            let entry = entry.value_mut();
            if entry.stale && entry.inflight.is_none() {
                continue;
            }
            entry.generation += 1;
            entry.stale = true;
            entry.inflight = None;
            count += 1;
        }
        tracing::debug!(%prefix, count, "Invalidated");
        count
    }

    /// Cached value regardless of staleness
    pub fn get_data<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        let entry = self.entries.get(key)?;
        entry.value.as_ref()?.downcast_ref::<T>().cloned()
    }

    /// Store a value directly, e.g. the body of a mutation response
    ///
    /// Counts as a fresh load and supersedes any pending one.
    pub fn set_data<T: Send + Sync + 'static>(&self, key: &QueryKey, value: T) {
        let mut entry = self.entries.entry(key.clone()).or_default();
        entry.generation += 1;
        entry.value = Some(Arc::new(value));
        entry.stale = false;
        entry.inflight = None;
        entry.last_error = None;
    }

    pub fn status(&self, key: &QueryKey) -> QueryStatus {
        self.entries
            .get(key)
            .map(|entry| QueryStatus {
                has_data: entry.value.is_some(),
                is_stale: entry.stale,
                is_fetching: entry.inflight.is_some(),
                last_error: entry.last_error.clone(),
                generation: entry.generation,
            })
            .unwrap_or_default()
    }

    /// Drop one key; a pending load for it finishes without storing
    pub fn remove(&self, key: &QueryKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Record a finished load if it is still the key's pending load
///
/// Load ids come from a cache-wide counter, so a load started before the key
/// was removed can never match the pending load of a recreated entry.
fn store(
    entries: &DashMap<QueryKey, Entry>,
    key: &QueryKey,
    load_id: u64,
    result: &LoadResult,
) {
    let Some(mut entry) = entries.get_mut(key) else {
        tracing::debug!(%key, load_id, "Discarding response for removed key");
        return;
    };
    if !entry.inflight.as_ref().is_some_and(|f| f.load_id == load_id) {
        tracing::debug!(%key, load_id, "Discarding superseded response");
        return;
    }
    entry.inflight = None;
    match result {
        Ok(value) => {
            entry.value = Some(Arc::clone(value));
            entry.stale = false;
            entry.last_error = None;
        }
        Err(err) => {
            tracing::warn!(%key, error = %err, "Load failed");
            entry.last_error = Some(err.to_string());
        }
    }
}

fn downcast<T: Clone + 'static>(key: &QueryKey, value: &AnyValue) -> ClientResult<T> {
    value.downcast_ref::<T>().cloned().ok_or_else(|| {
        ClientError::Internal(format!(
            "cached value for {key} is not a {}",
            std::any::type_name::<T>()
        ))
    })
}
