//! Declarative test builder.
//!
//! Endpoints are queued on the builder and registered on a fresh mock server by `build()`,
//! which stores the resulting mocks on the [`TestSetup`] for `assert_mocks()`.

use mockito::Mock;
use serde_json::Value;

use crate::TestSetup;

type MockBuilder = Box<dyn FnOnce(&mut TestSetup) -> Mock>;

/// Builder for declarative test initialization
pub struct TestBuilder {
    mock_builders: Vec<MockBuilder>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            mock_builders: Vec::new(),
        }
    }

    /// Add a mock endpoint that responds with `status` and a JSON `body`
    pub fn with_endpoint(
        self,
        method: &'static str,
        path: impl Into<String>,
        status: usize,
        body: Value,
        expected_requests: usize,
    ) -> Self {
        let path = path.into();

        self.with_mock(move |setup| {
            setup
                .api()
                .create_endpoint(method, &path, status, body, expected_requests)
        })
    }

    /// Add a mock endpoint that fails with `status` and a server-provided message
    pub fn with_error_endpoint(
        self,
        method: &'static str,
        path: impl Into<String>,
        status: usize,
        message: &'static str,
        expected_requests: usize,
    ) -> Self {
        let path = path.into();

        self.with_mock(move |setup| {
            setup
                .api()
                .create_error_endpoint(method, &path, status, message, expected_requests)
        })
    }

    /// Add a mock endpoint for one page of the games list
    pub fn with_games_page_endpoint(
        self,
        page: u32,
        limit: u32,
        total_items: u64,
        expected_requests: usize,
    ) -> Self {
        self.with_mock(move |setup| {
            setup
                .api()
                .create_games_page_endpoint(page, limit, total_items, expected_requests)
        })
    }

    /// Add a custom mock endpoint.
    ///
    /// Custom endpoints are registered in the order they were added, which allows several
    /// mocks for the same path (e.g. an error followed by a success).
    pub fn with_mock<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut TestSetup) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Start the mock server and register all queued endpoints
    pub async fn build(self) -> TestSetup {
        let mut setup = TestSetup::new().await;

        for builder in self.mock_builders {
            let mock = builder(&mut setup);
            setup.mocks.push(mock);
        }

        setup
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
