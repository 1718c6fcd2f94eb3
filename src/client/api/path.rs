use std::fmt;

use reqwest::Url;

/// Path below the API base URL, kept as raw segments.
///
/// Segments are percent-encoded only when joined onto the base URL, so an ID containing
/// `/`, `?` or `#` stays a single segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPath(Vec<String>);

impl ApiPath {
    pub fn new(segment: impl ToString) -> Self {
        ApiPath(vec![segment.to_string()])
    }

    pub fn push(mut self, segment: impl ToString) -> Self {
        self.0.push(segment.to_string());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Append this path to `base`, encoding every segment
    ///
    /// # Arguments
    /// - `base` - An `http` or `https` URL such as `http://localhost:5000/api`
    ///
    /// # Returns
    /// - `Some(Url)` - `base` with the segments appended
    /// - `None` - `base` cannot carry a path (e.g. `mailto:`)
    pub fn join_onto(&self, base: &Url) -> Option<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(&self.0);

        Some(url)
    }
}

impl fmt::Display for ApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}
