//! Constants shared by tests that talk to the mock marketplace API.
//!
//! None of these are real credentials or records.

/// Path prefix every mocked endpoint lives under, mirroring the real `/api` mount point.
pub static TEST_API_PREFIX: &str = "/api";

/// Bearer token used by tests that check the `Authorization` header.
pub static TEST_ACCESS_TOKEN: &str = "test-access-token";

/// Game that owns the services created by the fixtures.
pub const TEST_GAME_ID: i64 = 1;

/// Currency service whose pricing configuration the fixtures describe.
pub static TEST_SERVICE_ID: &str = "svc-1";
