use std::sync::Mutex;

use futures::future::AbortHandle;

use crate::{
    client::{
        editor::{EditorState, FieldUpdate, Level, PackageSubmitter, PricingEditor, TreePath},
        error::{api::ApiError, editor::EditorError},
    },
    model::currency::CurrencyPackage,
};

/// Records submissions and answers with a fixed result
struct FakeSubmitter {
    calls: Mutex<Vec<(String, Vec<CurrencyPackage>)>>,
    response: Result<(), ApiError>,
}

impl FakeSubmitter {
    fn ok() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            response: Ok(()),
        }
    }

    fn failing(err: ApiError) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            response: Err(err),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl PackageSubmitter for FakeSubmitter {
    async fn submit_packages(
        &self,
        service_id: &str,
        packages: &[CurrencyPackage],
    ) -> Result<Vec<CurrencyPackage>, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push((service_id.to_string(), packages.to_vec()));

        self.response.clone().map(|_| packages.to_vec())
    }
}

/// Submitter that never answers
struct HangingSubmitter;

impl PackageSubmitter for HangingSubmitter {
    async fn submit_packages(
        &self,
        _service_id: &str,
        _packages: &[CurrencyPackage],
    ) -> Result<Vec<CurrencyPackage>, ApiError> {
        futures::future::pending().await
    }
}

fn path(indices: &[usize]) -> TreePath {
    TreePath::from(indices)
}

/// 500 Gold / US / West / California / 4.99 USD
fn gold_editor() -> PricingEditor {
    let mut editor = PricingEditor::new();

    let package = editor.add_child(&TreePath::root()).unwrap();
    let package = path(&[package]);
    editor.update_field(&package, FieldUpdate::Amount(500)).unwrap();
    editor
        .update_field(&package, FieldUpdate::Unit("Gold".to_string()))
        .unwrap();

    let country = package.child(editor.add_child(&package).unwrap());
    editor
        .update_field(&country, FieldUpdate::Name("US".to_string()))
        .unwrap();
    let region = country.child(editor.add_child(&country).unwrap());
    editor
        .update_field(&region, FieldUpdate::Name("West".to_string()))
        .unwrap();
    let subregion = region.child(editor.add_child(&region).unwrap());
    editor
        .update_field(&subregion, FieldUpdate::Name("California".to_string()))
        .unwrap();
    let price = subregion.child(editor.add_child(&subregion).unwrap());
    editor.update_field(&price, FieldUpdate::Price(4.99)).unwrap();
    editor
        .update_field(&price, FieldUpdate::CurrencyCode("USD".to_string()))
        .unwrap();

    editor
}

#[test]
fn new_editor_is_empty() {
    let editor = PricingEditor::new();

    assert_eq!(editor.state(), &EditorState::Empty);
    assert!(editor.is_empty());
}

#[test]
fn complete_tree_flattens_to_nested_packages() {
    let editor = gold_editor();
    assert_eq!(editor.state(), &EditorState::Editing);

    let packages = editor.to_flat_payload().unwrap();

    assert_eq!(packages.len(), 1);
    let package = &packages[0];
    assert_eq!((package.amount, package.unit.as_str()), (500, "Gold"));
    let country = &package.countries[0];
    assert_eq!(country.name, "US");
    let region = &country.regions[0];
    assert_eq!(region.name, "West");
    let subregion = &region.subregions[0];
    assert_eq!(subregion.name, "California");
    assert_eq!(subregion.prices.len(), 1);
    assert_eq!(subregion.prices[0].amount, 4.99);
    assert_eq!(subregion.prices[0].currency_code, "USD");
}

#[test]
fn flattened_tree_round_trips() {
    let packages = gold_editor().to_flat_payload().unwrap();

    let json = serde_json::to_string(&packages).unwrap();
    let decoded: Vec<CurrencyPackage> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, packages);

    let reloaded = PricingEditor::from_packages(&decoded);
    assert_eq!(reloaded.state(), &EditorState::Editing);
    assert_eq!(reloaded.to_flat_payload().unwrap(), packages);
}

#[test]
fn incomplete_tree_names_first_missing_level() {
    let mut editor = PricingEditor::new();
    let package = path(&[editor.add_child(&TreePath::root()).unwrap()]);
    editor.update_field(&package, FieldUpdate::Amount(500)).unwrap();
    editor
        .update_field(&package, FieldUpdate::Unit("Gold".to_string()))
        .unwrap();

    let err = editor.to_flat_payload().unwrap_err();

    assert_eq!(err.path, "packages[0].countries");
    assert_eq!(err.message, "At least one country is required");
}

#[test]
fn empty_tree_is_incomplete() {
    let err = PricingEditor::new().to_flat_payload().unwrap_err();
    assert_eq!(err.path, "packages");
}

#[test]
fn removing_last_price_flags_subregion() {
    let mut editor = gold_editor();

    editor.remove_child(&path(&[0, 0, 0, 0, 0])).unwrap();

    assert_eq!(editor.child_count(&path(&[0, 0, 0, 0])).unwrap(), 0);
    assert_eq!(
        editor.child_count(&path(&[0, 0, 0])).unwrap(),
        1,
        "Subregion should not be pruned"
    );
    let err = editor.to_flat_payload().unwrap_err();
    assert_eq!(
        err.path,
        "packages[0].countries[0].regions[0].subregions[0].prices"
    );
}

#[test]
fn removing_a_country_removes_its_branch_and_keeps_siblings() {
    let mut editor = gold_editor();
    let package = path(&[0]);
    let second = package.child(editor.add_seeded_child(&package).unwrap());
    editor
        .update_field(&second, FieldUpdate::Name("CA".to_string()))
        .unwrap();

    editor.remove_child(&path(&[0, 0])).unwrap();

    assert_eq!(editor.child_count(&package).unwrap(), 1);
    assert_eq!(
        editor.child_count(&path(&[0, 0, 0, 0])).unwrap(),
        1,
        "Seeded branch should reach a price"
    );
    let err = editor.to_flat_payload().unwrap_err();
    assert_eq!(err.path, "packages[0].countries[0].regions[0].name");
}

#[test]
fn add_child_leaves_siblings_untouched() {
    let mut editor = gold_editor();
    let subregion = path(&[0, 0, 0, 0]);

    let index = editor.add_child(&subregion).unwrap();

    assert_eq!(index, 1);
    let err = editor.to_flat_payload().unwrap_err();
    assert_eq!(
        err.path,
        "packages[0].countries[0].regions[0].subregions[0].prices[1].amount",
        "Only the new blank price should be invalid"
    );
}

#[test]
fn removing_last_package_empties_editor() {
    let mut editor = gold_editor();

    editor.remove_child(&path(&[0])).unwrap();

    assert_eq!(editor.state(), &EditorState::Empty);
}

#[test]
fn rejects_invalid_paths_and_fields() {
    let mut editor = gold_editor();

    assert_eq!(
        editor.add_child(&path(&[0, 0, 0, 0, 0])),
        Err(EditorError::LeafHasNoChildren(path(&[0, 0, 0, 0, 0])))
    );
    assert_eq!(
        editor.remove_child(&path(&[3])),
        Err(EditorError::InvalidPath(path(&[3])))
    );
    assert_eq!(
        editor.remove_child(&TreePath::root()),
        Err(EditorError::InvalidPath(TreePath::root()))
    );
    assert_eq!(
        editor.update_field(&path(&[0, 0]), FieldUpdate::Price(1.0)),
        Err(EditorError::FieldNotApplicable {
            field: "price",
            level: Level::Country
        })
    );
}

#[tokio::test]
async fn submit_sends_once_and_resets() {
    let mut editor = gold_editor();
    let expected = editor.to_flat_payload().unwrap();
    let submitter = FakeSubmitter::ok();

    let created = editor.submit(&submitter, "svc-1").await.unwrap();

    assert_eq!(created, expected);
    assert_eq!(submitter.call_count(), 1);
    assert_eq!(submitter.calls.lock().unwrap()[0].0, "svc-1");
    assert_eq!(editor.state(), &EditorState::Submitted);
    assert!(editor.is_empty());

    editor.add_child(&TreePath::root()).unwrap();
    assert_eq!(editor.state(), &EditorState::Editing);
}

#[tokio::test]
async fn incomplete_tree_is_never_submitted() {
    let mut editor = gold_editor();
    editor.remove_child(&path(&[0, 0, 0, 0, 0])).unwrap();
    let submitter = FakeSubmitter::ok();

    let result = editor.submit(&submitter, "svc-1").await;

    assert!(matches!(result, Err(EditorError::Validation(_))));
    assert_eq!(submitter.call_count(), 0);
    assert_eq!(editor.state(), &EditorState::Editing);
}

#[tokio::test]
async fn failed_submit_keeps_tree() {
    let mut editor = gold_editor();
    let err = ApiError::Server("Failed to create currency packages".to_string());
    let submitter = FakeSubmitter::failing(err.clone());

    let result = editor.submit(&submitter, "svc-1").await;

    assert_eq!(result, Err(EditorError::Submit(err.clone())));
    assert_eq!(editor.state(), &EditorState::SubmitError(err));
    assert!(editor.to_flat_payload().is_ok());

    editor.resume_editing();
    assert_eq!(editor.state(), &EditorState::Editing);
}

#[tokio::test]
async fn aborted_submit_resumes_editing() {
    let mut editor = gold_editor();
    let (handle, registration) = AbortHandle::new_pair();
    handle.abort();

    let result = editor
        .submit_abortable(&HangingSubmitter, "svc-1", registration)
        .await;

    assert_eq!(result, Err(EditorError::Submit(ApiError::Cancelled)));
    assert_eq!(editor.state(), &EditorState::Editing);
    assert!(!editor.is_empty());
}
