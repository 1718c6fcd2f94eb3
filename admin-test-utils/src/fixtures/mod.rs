//! Test fixtures for the mock marketplace API.
//!
//! - `factory` - JSON records shaped like the API's responses
//! - `mockito` - mock endpoints registered on the test server

pub mod factory;
pub mod mockito;

use crate::TestSetup;

impl TestSetup {
    pub fn api<'a>(&'a mut self) -> ApiFixtures<'a> {
        ApiFixtures { setup: self }
    }
}

pub struct ApiFixtures<'a> {
    pub setup: &'a mut TestSetup,
}
