use crate::client::{cache::CacheKey, error::api::ApiError};

type Callback<A> = Box<dyn FnOnce(&A) + Send>;

/// What a mutation invalidates and who is told about its outcome
pub struct MutationOptions<T> {
    pub(crate) invalidates: Vec<CacheKey>,
    pub(crate) on_success: Option<Callback<T>>,
    pub(crate) on_error: Option<Callback<ApiError>>,
}

impl<T> MutationOptions<T> {
    /// Mark every entry under each of `prefixes` stale once the mutation succeeds
    pub fn invalidates(prefixes: impl IntoIterator<Item = CacheKey>) -> Self {
        Self {
            invalidates: prefixes.into_iter().collect(),
            on_success: None,
            on_error: None,
        }
    }

    pub fn on_success(mut self, callback: impl FnOnce(&T) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl FnOnce(&ApiError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }
}
