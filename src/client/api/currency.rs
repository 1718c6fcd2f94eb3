use reqwest::Method;

use crate::{
    client::{
        api::{path::ApiPath, with_body, ApiClient},
        error::api::ApiError,
        schema::Validate,
    },
    model::{
        api::DataEnvelope,
        currency::{validate_packages, CurrencyConfigDto, CurrencyPackage},
        payload::IntoRequestBody,
    },
};

fn currency_path(service_id: &str, endpoint: &str) -> ApiPath {
    ApiPath::new("service")
        .push("currency")
        .push(service_id)
        .push(endpoint)
}

impl ApiClient {
    /// Fetch the pricing configuration of a currency service.
    ///
    /// Presets default to 500 and 1000 units when the server has none configured.
    pub async fn currency_config(&self, service_id: &str) -> Result<CurrencyConfigDto, ApiError> {
        let request = self.request(Method::GET, &currency_path(service_id, "config"))?;
        let envelope: DataEnvelope<CurrencyConfigDto> = self
            .send(request, "Failed to fetch currency config")
            .await?;

        Ok(envelope.data.with_default_presets())
    }

    /// Replace the pricing configuration of a currency service
    pub async fn update_currency_config(
        &self,
        service_id: &str,
        config: CurrencyConfigDto,
    ) -> Result<CurrencyConfigDto, ApiError> {
        config.validate()?;

        let request = with_body(
            self.request(Method::PATCH, &currency_path(service_id, "config"))?,
            config.into_body()?,
        )?;
        let envelope: DataEnvelope<CurrencyConfigDto> = self
            .send(request, "Failed to create currency config")
            .await?;

        Ok(envelope.data.with_default_presets())
    }

    /// Submit currency packages with their per-region prices in one request
    pub async fn create_currency_packages(
        &self,
        service_id: &str,
        packages: &[CurrencyPackage],
    ) -> Result<Vec<CurrencyPackage>, ApiError> {
        validate_packages(packages)?;

        let request = self
            .request(Method::POST, &currency_path(service_id, "packages"))?
            .json(packages);
        let envelope: DataEnvelope<Vec<CurrencyPackage>> = self
            .send(request, "Failed to create currency packages")
            .await?;

        Ok(envelope.data)
    }
}
