use std::{any::Any, sync::Arc};

use crate::client::error::api::ApiError;

/// Type-erased cached value; each key always holds values of one type
pub(crate) type Value = Arc<dyn Any + Send + Sync>;

#[derive(Clone)]
pub(crate) enum Entry {
    /// Valid until invalidated
    Fresh(Value),
    /// Still shown, but the next query fetches again
    Stale(Value),
    /// Returned as-is until refetched or invalidated
    Failed(ApiError),
}

/// Snapshot of one query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub is_error: bool,
    pub is_stale: bool,
    pub error: Option<ApiError>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            is_error: false,
            is_stale: false,
            error: None,
        }
    }
}

pub(crate) fn downcast<T: Clone + 'static>(value: &Value) -> Option<T> {
    value.downcast_ref::<T>().cloned()
}
