//! HTTP-level tests for [`ApiClient`] against a mockito server.

mod currency;

use admin_test_utils::TestSetup;

use crate::client::{api::ApiClient, config::Config, error::Error};

fn client(setup: &TestSetup) -> Result<ApiClient, Error> {
    Ok(ApiClient::new(&Config::new(setup.api_url()))?)
}
