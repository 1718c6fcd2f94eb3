//! Tests for submitting an edited pricing tree.
//!
//! These drive [`PricingEditor`] end to end against a mock API: the tree is built through
//! path-based edits, flattened, validated and sent as one JSON request.

use admin_test_utils::prelude::*;
use marketplace_admin::client::{
    api::ApiClient,
    cache::QueryCache,
    config::Config,
    editor::{EditorState, FieldUpdate, PricingEditor, TreePath},
    error::{editor::EditorError, Error},
    store::AppContext,
};
use serde_json::json;

fn context(setup: &TestSetup) -> Result<AppContext, Error> {
    Ok(AppContext::from_parts(
        ApiClient::new(&Config::new(setup.api_url()))?,
        QueryCache::new(),
    ))
}

/// Build 500 Gold sold in US / West / California; `price` is left out when `None`
fn gold_package(price: Option<(f64, &str)>) -> Result<PricingEditor, EditorError> {
    let mut editor = PricingEditor::new();

    let package = TreePath::root().child(editor.add_child(&TreePath::root())?);
    editor.update_field(&package, FieldUpdate::Amount(500))?;
    editor.update_field(&package, FieldUpdate::Unit("Gold".to_string()))?;

    let mut path = package;
    for name in ["US", "West", "California"] {
        path = path.child(editor.add_child(&path)?);
        editor.update_field(&path, FieldUpdate::Name(name.to_string()))?;
    }

    if let Some((amount, currency)) = price {
        let price = path.child(editor.add_child(&path)?);
        editor.update_field(&price, FieldUpdate::Price(amount))?;
        editor.update_field(&price, FieldUpdate::CurrencyCode(currency.to_string()))?;
    }

    Ok(editor)
}

fn packages_endpoint(expected_requests: usize) -> TestBuilder {
    TestBuilder::new().with_mock(move |setup| {
        let package = factory::mock_package(500, "Gold", 4.99, "USD");
        setup.api().create_json_body_endpoint(
            "POST",
            "/service/currency/svc-1/packages",
            json!([package.clone()]),
            factory::data_body(json!([package])),
            expected_requests,
        )
    })
}

/// Tests submitting a complete tree through the currency store.
///
/// Verifies that exactly one request carrying the nested package list is sent and that the
/// editor resets afterwards.
///
/// Expected: Ok with the created packages
#[tokio::test]
async fn submits_complete_tree_once() -> Result<(), Error> {
    let setup = packages_endpoint(1).build().await;
    let ctx = context(&setup)?;
    let mut editor = gold_package(Some((4.99, "USD")))?;

    let created = editor.submit(&ctx.currency(), TEST_SERVICE_ID).await?;

    assert_eq!(created.len(), 1);
    assert_eq!(created[0].countries[0].regions[0].subregions[0].prices[0].currency_code, "USD");
    assert_eq!(editor.state(), &EditorState::Submitted);
    assert!(editor.is_empty());
    setup.assert_mocks();

    Ok(())
}

/// Tests submitting directly through the API client.
///
/// Expected: Ok with the created packages
#[tokio::test]
async fn submits_through_client() -> Result<(), Error> {
    let setup = packages_endpoint(1).build().await;
    let ctx = context(&setup)?;
    let mut editor = gold_package(Some((4.99, "USD")))?;

    editor.submit(&ctx.client, TEST_SERVICE_ID).await?;

    setup.assert_mocks();

    Ok(())
}

/// Tests that an incomplete tree never reaches the API.
///
/// A subregion without prices fails validation before any request is sent.
///
/// Expected: Err with the subregion's prices path
#[tokio::test]
async fn rejects_incomplete_tree_without_request() -> Result<(), Error> {
    let setup = packages_endpoint(0).build().await;
    let ctx = context(&setup)?;
    let mut editor = gold_package(None)?;

    let result = editor.submit(&ctx.currency(), TEST_SERVICE_ID).await;

    let err = match result {
        Err(EditorError::Validation(err)) => err,
        other => panic!("Expected a validation error, got {:?}", other),
    };
    assert_eq!(
        err.path,
        "packages[0].countries[0].regions[0].subregions[0].prices"
    );
    assert_eq!(editor.state(), &EditorState::Editing);
    setup.assert_mocks();

    Ok(())
}

/// Tests a rejected submission.
///
/// Verifies that the server's message is surfaced and that the tree is kept for another
/// attempt.
///
/// Expected: Err with a validation ApiError
#[tokio::test]
async fn keeps_tree_when_server_rejects() -> Result<(), Error> {
    let setup = TestBuilder::new()
        .with_error_endpoint(
            "POST",
            "/service/currency/svc-1/packages",
            422,
            "Duplicate package amount",
            1,
        )
        .build()
        .await;
    let ctx = context(&setup)?;
    let mut editor = gold_package(Some((4.99, "USD")))?;

    let result = editor.submit(&ctx.currency(), TEST_SERVICE_ID).await;

    assert!(matches!(result, Err(EditorError::Submit(_))));
    assert!(matches!(editor.state(), EditorState::SubmitError(_)));
    assert!(editor.to_flat_payload().is_ok());
    setup.assert_mocks();

    Ok(())
}
