use crate::{
    client::{
        api::ApiClient,
        cache::{CacheKey, MutationOptions, QueryState},
        editor::PackageSubmitter,
        error::api::ApiError,
        store::AppContext,
    },
    model::currency::{CurrencyConfigDto, CurrencyPackage},
};

const CONFIG_KEY: &str = "currencyConfig";

/// Currency service configuration and package submission
pub struct CurrencyStore<'a> {
    pub(super) ctx: &'a AppContext,
}

impl CurrencyStore<'_> {
    pub fn config_key(service_id: &str) -> CacheKey {
        CacheKey::new(CONFIG_KEY).with(service_id)
    }

    /// Cached configuration of one currency service
    pub async fn config(&self, service_id: &str) -> Result<CurrencyConfigDto, ApiError> {
        let client = self.ctx.client.clone();
        let id = service_id.to_string();

        self.ctx
            .cache
            .fetch(Self::config_key(service_id), move || async move {
                client.currency_config(&id).await
            })
            .await
    }

    pub fn config_state(&self, service_id: &str) -> QueryState<CurrencyConfigDto> {
        self.ctx.cache.state(&Self::config_key(service_id))
    }

    /// Replace the configuration of a service, invalidating every cached configuration
    pub async fn update_config(
        &self,
        service_id: &str,
        config: CurrencyConfigDto,
    ) -> Result<CurrencyConfigDto, ApiError> {
        self.ctx
            .cache
            .mutate(
                MutationOptions::invalidates([CacheKey::new(CONFIG_KEY)]),
                self.ctx.client.update_currency_config(service_id, config),
            )
            .await
    }

    /// Submit packages for a service, invalidating that service's configuration
    pub async fn create_packages(
        &self,
        service_id: &str,
        packages: &[CurrencyPackage],
    ) -> Result<Vec<CurrencyPackage>, ApiError> {
        self.ctx
            .cache
            .mutate(
                MutationOptions::invalidates([Self::config_key(service_id)]),
                self.ctx.client.create_currency_packages(service_id, packages),
            )
            .await
    }
}

impl PackageSubmitter for CurrencyStore<'_> {
    async fn submit_packages(
        &self,
        service_id: &str,
        packages: &[CurrencyPackage],
    ) -> Result<Vec<CurrencyPackage>, ApiError> {
        self.create_packages(service_id, packages).await
    }
}

impl PackageSubmitter for ApiClient {
    async fn submit_packages(
        &self,
        service_id: &str,
        packages: &[CurrencyPackage],
    ) -> Result<Vec<CurrencyPackage>, ApiError> {
        self.create_currency_packages(service_id, packages).await
    }
}
