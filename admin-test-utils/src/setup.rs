use mockito::{Mock, Server, ServerGuard};

use crate::constant::TEST_API_PREFIX;

pub struct TestSetup {
    pub server: ServerGuard,
    pub mocks: Vec<Mock>,
}

impl TestSetup {
    pub async fn new() -> Self {
        let server = Server::new_async().await;

        TestSetup {
            server,
            mocks: Vec::new(),
        }
    }

    /// Base URL to configure the client under test with, e.g. `http://127.0.0.1:1234/api`
    pub fn api_url(&self) -> String {
        format!("{}{}", self.server.url(), TEST_API_PREFIX)
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
