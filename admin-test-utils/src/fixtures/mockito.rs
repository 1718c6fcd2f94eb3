//! Mock HTTP endpoints for the marketplace API.
//!
//! Every endpoint is registered under [`TEST_API_PREFIX`] and verifies it was called exactly
//! `expected_requests` times once [`crate::TestSetup::assert_mocks`] runs (or the mock is
//! asserted directly).

use mockito::{Matcher, Mock};
use serde_json::Value;

use crate::{
    constant::TEST_API_PREFIX,
    fixtures::{
        factory::{error_body, list_body, mock_game},
        ApiFixtures,
    },
};

fn prefixed(path: &str) -> String {
    format!("{}{}", TEST_API_PREFIX, path)
}

impl<'a> ApiFixtures<'a> {
    /// Create a mock endpoint that responds with a JSON body.
    ///
    /// # Arguments
    /// - `method` - HTTP method to match
    /// - `path` - Path below the API prefix, e.g. `/game/1`
    /// - `status` - Status code to respond with
    /// - `body` - JSON response body
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn create_endpoint(
        &mut self,
        method: &str,
        path: &str,
        status: usize,
        body: Value,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock(method, prefixed(path).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock endpoint that fails with `status` and a server-provided message
    pub fn create_error_endpoint(
        &mut self,
        method: &str,
        path: &str,
        status: usize,
        message: &str,
        expected_requests: usize,
    ) -> Mock {
        self.create_endpoint(method, path, status, error_body(message), expected_requests)
    }

    /// Create a mock GET endpoint that only matches the given query parameters
    pub fn create_query_endpoint(
        &mut self,
        path: &str,
        query: &[(&str, &str)],
        body: Value,
        expected_requests: usize,
    ) -> Mock {
        let matchers = query
            .iter()
            .map(|(key, value)| Matcher::UrlEncoded(key.to_string(), value.to_string()))
            .collect();

        self.setup
            .server
            .mock("GET", prefixed(path).as_str())
            .match_query(Matcher::AllOf(matchers))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock endpoint for one page of the games list.
    ///
    /// The page contains games with IDs `(page - 1) * limit + 1 ..= page * limit`.
    pub fn create_games_page_endpoint(
        &mut self,
        page: u32,
        limit: u32,
        total_items: u64,
        expected_requests: usize,
    ) -> Mock {
        let first = i64::from((page - 1) * limit) + 1;
        let games = (first..first + i64::from(limit)).map(mock_game).collect();
        let (page_param, limit_param) = (page.to_string(), limit.to_string());

        self.create_query_endpoint(
            "/game",
            &[("page", page_param.as_str()), ("limit", limit_param.as_str())],
            list_body(games, page, limit, total_items),
            expected_requests,
        )
    }

    /// Create a mock endpoint that requires the `Authorization: Bearer {token}` header
    pub fn create_authorized_endpoint(
        &mut self,
        method: &str,
        path: &str,
        token: &str,
        body: Value,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock(method, prefixed(path).as_str())
            .match_header("authorization", format!("Bearer {}", token).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock endpoint that only matches requests carrying exactly `request_body` as JSON
    pub fn create_json_body_endpoint(
        &mut self,
        method: &str,
        path: &str,
        request_body: Value,
        body: Value,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock(method, prefixed(path).as_str())
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(request_body))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock endpoint that only matches multipart requests containing `field_name`
    pub fn create_multipart_endpoint(
        &mut self,
        method: &str,
        path: &str,
        field_name: &str,
        body: Value,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock(method, prefixed(path).as_str())
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data".to_string()),
            )
            .match_body(Matcher::Regex(format!("name=\"{}\"", field_name)))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }
}
