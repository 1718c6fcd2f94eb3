use admin_test_utils::prelude::*;
use serde_json::json;

use crate::{
    client::{
        api::tests::client,
        error::{api::ApiError, Error},
    },
    model::currency::{Country, CurrencyPackage, Price, Region, Subregion},
};

fn package() -> CurrencyPackage {
    CurrencyPackage {
        amount: 500,
        unit: "Gold".to_string(),
        countries: vec![Country {
            name: "US".to_string(),
            regions: vec![Region {
                name: "West".to_string(),
                subregions: vec![Subregion {
                    name: "California".to_string(),
                    prices: vec![Price {
                        amount: 4.99,
                        currency_code: "USD".to_string(),
                    }],
                }],
            }],
        }],
    }
}

/// Expect default presets when the configuration has none
#[tokio::test]
async fn test_currency_config_default_presets() -> Result<(), Error> {
    let setup = TestBuilder::new()
        .with_endpoint(
            "GET",
            "/service/currency/svc-1/config",
            200,
            factory::data_body(factory::mock_currency_config(TEST_SERVICE_ID)),
            1,
        )
        .build()
        .await;
    let client = client(&setup)?;

    let config = client.currency_config(TEST_SERVICE_ID).await?;

    let amounts: Vec<f64> = config.presets.iter().map(|preset| preset.amount).collect();
    assert_eq!(amounts, vec![500.0, 1000.0]);
    assert_eq!(config.price_for(&config.servers[0], 500.0), Some(12.5));
    setup.assert_mocks();

    Ok(())
}

/// Expect reserved characters in a service ID to be encoded into a single path segment
#[tokio::test]
async fn test_currency_config_encodes_service_id() -> Result<(), Error> {
    let setup = TestBuilder::new()
        .with_endpoint(
            "GET",
            "/service/currency/a%3Fx=%2Fconfig/config",
            200,
            factory::data_body(factory::mock_currency_config("a?x=/config")),
            1,
        )
        .build()
        .await;
    let client = client(&setup)?;

    let config = client.currency_config("a?x=/config").await?;

    assert_eq!(config.service_id, "a?x=/config");
    setup.assert_mocks();

    Ok(())
}

/// Expect the packages to be sent once as a JSON array in the nested wire shape
#[tokio::test]
async fn test_create_currency_packages() -> Result<(), Error> {
    let expected = json!([factory::mock_package(500, "Gold", 4.99, "USD")]);

    let mut setup = TestSetup::new().await;
    let mock = setup.api().create_json_body_endpoint(
        "POST",
        "/service/currency/svc-1/packages",
        expected.clone(),
        factory::data_body(expected),
        1,
    );
    let client = client(&setup)?;

    let created = client
        .create_currency_packages(TEST_SERVICE_ID, &[package()])
        .await?;

    assert_eq!(created, vec![package()]);
    mock.assert();

    Ok(())
}

/// Expect Validation without a request when a price has no currency
#[tokio::test]
async fn test_create_currency_packages_invalid() -> Result<(), Error> {
    let setup = TestBuilder::new()
        .with_endpoint("POST", "/service/currency/svc-1/packages", 200, json!({}), 0)
        .build()
        .await;
    let client = client(&setup)?;

    let mut invalid = package();
    invalid.countries[0].regions[0].subregions[0].prices[0].currency_code = String::new();

    let err = client
        .create_currency_packages(TEST_SERVICE_ID, &[invalid])
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert!(
        err.message()
            .starts_with("packages[0].countries[0].regions[0].subregions[0].prices[0].currencyCode"),
        "Unexpected message: {}",
        err.message()
    );
    setup.assert_mocks();

    Ok(())
}
