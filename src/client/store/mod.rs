//! Cached queries and invalidating mutations per resource.
//!
//! Stores pair each [`ApiClient`] operation with its cache key and the key prefixes it
//! invalidates, so screens never talk to the cache or the client directly.

pub mod currency;
pub mod game;
pub mod service;


use std::marker::PhantomData;

use crate::{
    client::{
        api::{resource::Resource, ApiClient},
        cache::{CacheKey, MutationOptions, QueryCache, QueryState},
        config::Config,
        error::{api::ApiError, Error},
    },
    model::{
        api::{Deleted, ListParams, Page},
        game::GameDto,
        news::NewsDto,
        service::ServiceDto,
        user::UserDto,
    },
};

pub use currency::CurrencyStore;

/// Client and cache shared by every screen; constructed once at startup
#[derive(Clone)]
pub struct AppContext {
    pub client: ApiClient,
    pub cache: QueryCache,
}

impl AppContext {
    /// Build the client from `config` with an empty cache
    ///
    /// # Returns
    /// - `Ok(AppContext)` - Context shared by every store
    /// - `Err(Error)` - `config.api_url` is invalid or the HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, Error> {
        Ok(Self::from_parts(ApiClient::new(config)?, QueryCache::new()))
    }

    pub fn from_parts(client: ApiClient, cache: QueryCache) -> Self {
        Self { client, cache }
    }

    pub fn games(&self) -> ResourceStore<'_, GameDto> {
        ResourceStore::new(self)
    }

    pub fn news(&self) -> ResourceStore<'_, NewsDto> {
        ResourceStore::new(self)
    }

    pub fn services(&self) -> ResourceStore<'_, ServiceDto> {
        ResourceStore::new(self)
    }

    pub fn users(&self) -> ResourceStore<'_, UserDto> {
        ResourceStore::new(self)
    }

    pub fn currency(&self) -> CurrencyStore<'_> {
        CurrencyStore { ctx: self }
    }
}

/// Queries and mutations of one resource
pub struct ResourceStore<'a, R> {
    ctx: &'a AppContext,
    _resource: PhantomData<R>,
}

impl<'a, R: Resource> ResourceStore<'a, R> {
    fn new(ctx: &'a AppContext) -> Self {
        Self {
            ctx,
            _resource: PhantomData,
        }
    }

    /// Key of a list query.
    ///
    /// Scoped lists are keyed by their parent only; searchable lists include the search term.
    pub fn list_key(parent: Option<i64>, params: &ListParams) -> CacheKey {
        let kind = R::KIND;
        let key = CacheKey::new(kind.list_key());

        if kind.is_scoped() {
            return key.with(parent.unwrap_or_default());
        }

        let key = key.with(params.page).with(params.limit);
        if kind.supports_search() {
            key.with(params.search_term())
        } else {
            key
        }
    }

    pub fn detail_key(id: i64) -> CacheKey {
        CacheKey::new(R::KIND.detail_key()).with(id)
    }

    /// Prefix covering every list query of this resource
    pub fn list_prefix() -> CacheKey {
        CacheKey::new(R::KIND.list_key())
    }

    /// Cached page of `R`
    ///
    /// # Arguments
    /// - `parent` - Owning game for services, ignored otherwise
    /// - `params` - Page, limit and search term; each distinct combination is its own entry
    ///
    /// # Returns
    /// - `Ok(Page<R>)` - Cached page, or a freshly fetched one when missing or stale
    /// - `Err(ApiError)` - The fetch failed; the error stays cached until invalidated
    pub async fn list(&self, parent: Option<i64>, params: ListParams) -> Result<Page<R>, ApiError> {
        let client = self.ctx.client.clone();

        self.ctx
            .cache
            .fetch(Self::list_key(parent, &params), move || async move {
                client.list::<R>(parent, &params).await
            })
            .await
    }

    /// Snapshot of a list query without fetching
    pub fn list_state(&self, parent: Option<i64>, params: &ListParams) -> QueryState<Page<R>> {
        self.ctx.cache.state(&Self::list_key(parent, params))
    }

    /// Cached single `R`
    pub async fn get(&self, id: i64) -> Result<R, ApiError> {
        let client = self.ctx.client.clone();

        self.ctx
            .cache
            .fetch(Self::detail_key(id), move || async move {
                client.get::<R>(id).await
            })
            .await
    }

    /// Snapshot of a detail query without fetching
    pub fn get_state(&self, id: i64) -> QueryState<R> {
        self.ctx.cache.state(&Self::detail_key(id))
    }

    /// Create an `R`, invalidating every list of this resource
    pub async fn create(&self, parent: Option<i64>, payload: R::Payload) -> Result<R, ApiError> {
        self.ctx
            .cache
            .mutate(
                MutationOptions::invalidates([Self::list_prefix()]),
                self.ctx.client.create::<R>(parent, payload),
            )
            .await
    }

    /// Update an `R`, invalidating its detail query and every list of this resource
    ///
    /// # Arguments
    /// - `id` - ID of the record to update
    /// - `payload` - Replacement fields, validated before sending
    ///
    /// # Returns
    /// - `Ok(R)` - The updated record; matching cache entries are now stale
    /// - `Err(ApiError)` - The update failed and the cache is unchanged
    pub async fn update(&self, id: i64, payload: R::Payload) -> Result<R, ApiError> {
        self.ctx
            .cache
            .mutate(
                MutationOptions::invalidates([Self::detail_key(id), Self::list_prefix()]),
                self.ctx.client.update::<R>(id, payload),
            )
            .await
    }

    /// Delete an `R`, invalidating its detail query and every list of this resource
    pub async fn delete(&self, id: i64) -> Result<Deleted, ApiError> {
        self.ctx
            .cache
            .mutate(
                MutationOptions::invalidates([Self::detail_key(id), Self::list_prefix()]),
                self.ctx.client.delete::<R>(id),
            )
            .await
    }
}
