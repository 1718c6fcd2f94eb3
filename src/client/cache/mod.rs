//! Keyed query cache with in-flight de-duplication and prefix invalidation.
//!
//! Every query is stored under a [`CacheKey`]. Concurrent queries for the same key share one
//! fetch through a [`Shared`] future, and mutations mark whole key prefixes stale on success.
//! The lock guarding the state is never held across an `.await`.

pub mod entry;
pub mod key;
pub mod mutation;


pub use entry::QueryState;
pub use key::{CacheKey, KeyPart};
pub use mutation::MutationOptions;

use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};

use dioxus_logger::tracing;
use futures::{
    future::{BoxFuture, Shared},
    FutureExt,
};

use crate::client::{
    cache::entry::{downcast, Entry, Value},
    error::api::ApiError,
};

type SharedFetch = Shared<BoxFuture<'static, Result<Value, ApiError>>>;

struct InFlight {
    id: u64,
    future: SharedFetch,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<CacheKey, Entry>,
    in_flight: HashMap<CacheKey, InFlight>,
    next_fetch_id: u64,
}

impl CacheState {
    /// Store the result of fetch `id`.
    ///
    /// A fetch that was superseded (by invalidation or a forced refetch) never overwrites
    /// fresh data; a late success is kept as stale so it can still be shown.
    fn complete(&mut self, key: CacheKey, id: u64, result: &Result<Value, ApiError>) {
        let is_current = self.in_flight.get(&key).is_some_and(|fetch| fetch.id == id);

        if is_current {
            self.in_flight.remove(&key);

            let entry = match result {
                Ok(value) => Entry::Fresh(value.clone()),
                Err(err) => {
                    tracing::error!("Query {} failed: {}", key, err);
                    Entry::Failed(err.clone())
                }
            };
            self.entries.insert(key, entry);
        } else if let Ok(value) = result {
            if !matches!(self.entries.get(&key), Some(Entry::Fresh(_))) {
                tracing::debug!("Storing late result for {} as stale", key);
                self.entries.insert(key, Entry::Stale(value.clone()));
            }
        }
    }
}

/// Shared query cache; clones refer to the same entries
#[derive(Clone, Default)]
pub struct QueryCache {
    state: Arc<Mutex<CacheState>>,
}

fn lock(state: &Mutex<CacheState>) -> MutexGuard<'_, CacheState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn type_mismatch(key: &CacheKey) -> ApiError {
    ApiError::Server(format!("Cached value for {} has an unexpected type", key))
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, fetching it when missing or stale.
    ///
    /// A stored error is returned without calling `fetcher`; use [`QueryCache::refetch`] to
    /// retry. Concurrent calls for the same key share one in-flight fetch.
    pub async fn fetch<T, F, Fut>(&self, key: CacheKey, fetcher: F) -> Result<T, ApiError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let future = {
            let mut state = lock(&self.state);

            if let Some(fetch) = state.in_flight.get(&key) {
                tracing::debug!("Joining in-flight fetch for {}", key);
                fetch.future.clone()
            } else {
                match state.entries.get(&key) {
                    Some(Entry::Fresh(value)) => {
                        if let Some(data) = downcast::<T>(value) {
                            tracing::debug!("Cache hit for {}", key);
                            return Ok(data);
                        }
                    }
                    Some(Entry::Failed(err)) => return Err(err.clone()),
                    _ => {}
                }

                tracing::debug!("Cache miss for {}", key);
                self.start(&mut state, key.clone(), fetcher())
            }
        };

        let value = future.await?;
        downcast::<T>(&value).ok_or_else(|| type_mismatch(&key))
    }

    /// Fetch `key` and report the outcome as a [`QueryState`]
    pub async fn query<T, F, Fut>(&self, key: CacheKey, fetcher: F) -> QueryState<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        match self.fetch(key.clone(), fetcher).await {
            Ok(data) => QueryState {
                data: Some(data),
                ..self.state::<T>(&key)
            },
            Err(err) => QueryState {
                is_error: true,
                error: Some(err),
                ..self.state::<T>(&key)
            },
        }
    }

    /// Fetch `key` even when a fresh value or an error is stored.
    ///
    /// A fetch already in flight for `key` is joined instead of starting another.
    pub async fn refetch<T, F, Fut>(&self, key: CacheKey, fetcher: F) -> Result<T, ApiError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let future = {
            let mut state = lock(&self.state);

            match state.in_flight.get(&key) {
                Some(fetch) => fetch.future.clone(),
                None => {
                    tracing::debug!("Refetching {}", key);
                    self.start(&mut state, key.clone(), fetcher())
                }
            }
        };

        let value = future.await?;
        downcast::<T>(&value).ok_or_else(|| type_mismatch(&key))
    }

    /// Snapshot of the query stored under `key`
    pub fn state<T: Clone + 'static>(&self, key: &CacheKey) -> QueryState<T> {
        let state = lock(&self.state);
        let is_loading = state.in_flight.contains_key(key);

        match state.entries.get(key) {
            Some(Entry::Fresh(value)) => QueryState {
                data: downcast(value),
                is_loading,
                ..QueryState::default()
            },
            Some(Entry::Stale(value)) => QueryState {
                data: downcast(value),
                is_loading,
                is_stale: true,
                ..QueryState::default()
            },
            Some(Entry::Failed(err)) => QueryState {
                is_loading,
                is_error: true,
                error: Some(err.clone()),
                ..QueryState::default()
            },
            None => QueryState {
                is_loading,
                ..QueryState::default()
            },
        }
    }

    /// Mark every entry whose key starts with `prefix` stale.
    ///
    /// Stored errors under the prefix are dropped and in-flight fetches are released, so the
    /// next query for any matching key fetches again.
    pub fn invalidate(&self, prefix: &CacheKey) {
        let mut state = lock(&self.state);
        let mut count = 0;

        state.entries.retain(|key, entry| {
            if !key.starts_with(prefix) {
                return true;
            }
            count += 1;

            match entry {
                Entry::Fresh(value) => {
                    *entry = Entry::Stale(value.clone());
                    true
                }
                Entry::Stale(_) => true,
                Entry::Failed(_) => false,
            }
        });
        state.in_flight.retain(|key, _| !key.starts_with(prefix));

        tracing::debug!("Invalidated {} entries under {}", count, prefix);
    }

    /// Run a write and, on success, invalidate every prefix in `options`.
    ///
    /// On failure the cache is left untouched. The outcome is passed to the matching callback
    /// and returned.
    pub async fn mutate<T, Fut>(&self, options: MutationOptions<T>, mutation: Fut) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        match mutation.await {
            Ok(value) => {
                for prefix in &options.invalidates {
                    self.invalidate(prefix);
                }
                if let Some(on_success) = options.on_success {
                    on_success(&value);
                }

                Ok(value)
            }
            Err(err) => {
                tracing::warn!("Mutation failed: {}", err);
                if let Some(on_error) = options.on_error {
                    on_error(&err);
                }

                Err(err)
            }
        }
    }

    /// Drop every entry and release every in-flight fetch
    pub fn clear(&self) {
        let mut state = lock(&self.state);
        state.entries.clear();
        state.in_flight.clear();
    }

    /// Register a new in-flight fetch for `key`
    fn start<T, Fut>(&self, state: &mut CacheState, key: CacheKey, fetch: Fut) -> SharedFetch
    where
        T: Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        state.next_fetch_id += 1;
        let id = state.next_fetch_id;
        let weak: Weak<Mutex<CacheState>> = Arc::downgrade(&self.state);
        let store_key = key.clone();

        let future = async move {
            let result = fetch.await.map(|data| Arc::new(data) as Value);

            if let Some(state) = weak.upgrade() {
                lock(&state).complete(store_key, id, &result);
            }

            result
        }
        .boxed()
        .shared();

        state.in_flight.insert(
            key,
            InFlight {
                id,
                future: future.clone(),
            },
        );

        future
    }
}
