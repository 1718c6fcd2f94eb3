use thiserror::Error;

use crate::client::{
    editor::{Level, TreePath},
    error::api::ApiError,
    schema::ValidationError,
};

/// Errors raised by the pricing tree editor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// The path does not address an existing node
    #[error("No node exists at {0}")]
    InvalidPath(TreePath),
    /// Prices are leaves and cannot have children
    #[error("Node at {0} is a price and cannot have children")]
    LeafHasNoChildren(TreePath),
    /// The field does not exist on nodes of this level, e.g. a price on a country
    #[error("Field `{field}` does not apply to {level} nodes")]
    FieldNotApplicable { field: &'static str, level: Level },
    /// The tree failed validation when flattened for submission
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The submission request failed
    #[error(transparent)]
    Submit(#[from] ApiError),
}
