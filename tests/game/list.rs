//! Tests for cached game pages.

use admin_test_utils::prelude::*;
use marketplace_admin::{
    client::{
        api::ApiClient,
        cache::QueryCache,
        config::Config,
        error::Error,
        store::AppContext,
    },
    model::api::ListParams,
};

fn context(setup: &TestSetup) -> Result<AppContext, Error> {
    Ok(AppContext::from_parts(
        ApiClient::new(&Config::new(setup.api_url()))?,
        QueryCache::new(),
    ))
}

/// Tests that pages are cached independently.
///
/// Verifies that page 1 and page 2 are separate cache entries that are each fetched once.
///
/// Expected: Ok with different games on each page
#[tokio::test]
async fn caches_pages_separately() -> Result<(), Error> {
    let setup = TestBuilder::new()
        .with_games_page_endpoint(1, 10, 15, 1)
        .with_games_page_endpoint(2, 10, 15, 1)
        .build()
        .await;
    let ctx = context(&setup)?;

    let first = ctx.games().list(None, ListParams::new(1, 10)).await?;
    let second = ctx.games().list(None, ListParams::new(2, 10)).await?;
    ctx.games().list(None, ListParams::new(1, 10)).await?;
    ctx.games().list(None, ListParams::new(2, 10)).await?;

    assert_eq!(first.items[0].id, 1);
    assert_eq!(second.items[0].id, 11);
    assert_eq!(second.pagination.total_pages, 2);
    setup.assert_mocks();

    Ok(())
}

/// Tests that deleting a game invalidates every cached page.
///
/// Expected: Ok with both pages fetched again after the delete
#[tokio::test]
async fn delete_invalidates_every_page() -> Result<(), Error> {
    let setup = TestBuilder::new()
        .with_games_page_endpoint(1, 10, 15, 2)
        .with_games_page_endpoint(2, 10, 15, 2)
        .with_endpoint("DELETE", "/game/3", 200, serde_json::json!({}), 1)
        .build()
        .await;
    let ctx = context(&setup)?;
    let pages = [ListParams::new(1, 10), ListParams::new(2, 10)];

    for params in &pages {
        ctx.games().list(None, params.clone()).await?;
    }
    ctx.games().delete(3).await?;

    for params in &pages {
        assert!(ctx.games().list_state(None, params).is_stale);
        ctx.games().list(None, params.clone()).await?;
        assert!(!ctx.games().list_state(None, params).is_stale);
    }
    setup.assert_mocks();

    Ok(())
}
