//! Editor for the currency package pricing tree.
//!
//! The tree has five levels (package, country, region, subregion, price) addressed by
//! [`TreePath`]s. Edits are synchronous; only submission awaits. Removing the last child of a
//! node keeps the node and leaves it incomplete, so the next submission names it as the first
//! invalid path instead of silently dropping the branch.

mod arena;
pub mod field;
pub mod path;

#[cfg(test)]
mod tests;

pub use field::FieldUpdate;
pub use path::{Level, TreePath};

use dioxus_logger::tracing;
use futures::future::{AbortRegistration, Abortable};

use crate::{
    client::{
        editor::{
            arena::{Arena, NodeId},
            field::NodeData,
        },
        error::{api::ApiError, editor::EditorError},
        schema::ValidationError,
    },
    model::currency::{
        validate_packages, Country, CurrencyPackage, Price, Region, Subregion,
    },
};

/// Anything that can persist a submitted package list for a currency service
#[allow(async_fn_in_trait)]
pub trait PackageSubmitter {
    async fn submit_packages(
        &self,
        service_id: &str,
        packages: &[CurrencyPackage],
    ) -> Result<Vec<CurrencyPackage>, ApiError>;
}

/// Lifecycle of one editing session
#[derive(Debug, Clone, PartialEq)]
pub enum EditorState {
    /// No packages
    Empty,
    Editing,
    /// A complete tree is being sent
    Submitting,
    /// The last submission succeeded and the tree was reset
    Submitted,
    /// The last submission failed; the tree is kept for another attempt
    SubmitError(ApiError),
}

/// In-memory pricing tree with its editing state
#[derive(Debug, Clone)]
pub struct PricingEditor {
    arena: Arena,
    state: EditorState,
}

impl Default for PricingEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl PricingEditor {
    pub fn new() -> Self {
        Self {
            arena: Arena::default(),
            state: EditorState::Empty,
        }
    }

    /// Load an existing configuration for editing
    pub fn from_packages(packages: &[CurrencyPackage]) -> Self {
        let mut editor = Self::new();

        for package in packages {
            let Some(package_id) = editor.arena.insert(
                Level::Package,
                None,
                NodeData::Package {
                    amount: package.amount,
                    unit: package.unit.clone(),
                },
            ) else {
                continue;
            };

            for country in &package.countries {
                let Some(country_id) = editor.insert_named(Level::Country, package_id, &country.name)
                else {
                    continue;
                };

                for region in &country.regions {
                    let Some(region_id) = editor.insert_named(Level::Region, country_id, &region.name)
                    else {
                        continue;
                    };

                    for subregion in &region.subregions {
                        let Some(subregion_id) =
                            editor.insert_named(Level::Subregion, region_id, &subregion.name)
                        else {
                            continue;
                        };

                        for price in &subregion.prices {
                            editor.arena.insert(
                                Level::Price,
                                Some(subregion_id),
                                NodeData::Price {
                                    amount: price.amount,
                                    currency_code: price.currency_code.clone(),
                                },
                            );
                        }
                    }
                }
            }
        }

        editor.sync_empty();
        editor
    }

    fn insert_named(&mut self, level: Level, parent: NodeId, name: &str) -> Option<NodeId> {
        self.arena
            .insert(level, Some(parent), NodeData::Named(name.to_string()))
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Leave the error state after a failed submission
    pub fn resume_editing(&mut self) {
        if matches!(self.state, EditorState::SubmitError(_)) {
            self.state = EditorState::Editing;
        }
    }

    /// Number of children of the node at `path`; the root's children are the packages
    pub fn child_count(&self, path: &TreePath) -> Result<usize, EditorError> {
        if path.is_root() {
            return Ok(self.arena.roots().len());
        }

        let (level, id) = self.resolve(path)?;
        Ok(self
            .arena
            .node(level, id)
            .map_or(0, |node| node.children.len()))
    }

    /// Append a child with blank fields below `parent`; returns its index among its siblings
    pub fn add_child(&mut self, parent: &TreePath) -> Result<usize, EditorError> {
        let (child_level, parent_id) = if parent.is_root() {
            (Level::Package, None)
        } else {
            let (level, id) = self.resolve(parent)?;
            let child_level = level
                .child()
                .ok_or_else(|| EditorError::LeafHasNoChildren(parent.clone()))?;
            (child_level, Some(id))
        };

        self.arena
            .insert(child_level, parent_id, NodeData::default_for(child_level))
            .ok_or_else(|| EditorError::InvalidPath(parent.clone()))?;
        self.mark_edited();

        let index = self.child_count(parent)? - 1;
        tracing::debug!("Added {} at {}", child_level, parent.child(index));

        Ok(index)
    }

    /// Like [`PricingEditor::add_child`], but also seeds one blank descendant at every level
    /// below the new child, down to a price
    pub fn add_seeded_child(&mut self, parent: &TreePath) -> Result<usize, EditorError> {
        let index = self.add_child(parent)?;

        let mut path = parent.child(index);
        while path.level().and_then(Level::child).is_some() {
            let child = self.add_child(&path)?;
            path = path.child(child);
        }

        Ok(index)
    }

    /// Remove the node at `path` with its whole subtree.
    ///
    /// The parent is kept even when this was its last child; it then fails validation until
    /// a child is added or the parent itself is removed.
    pub fn remove_child(&mut self, path: &TreePath) -> Result<(), EditorError> {
        let (level, id) = self.resolve(path)?;

        self.arena.remove(level, id);
        self.sync_empty();
        tracing::debug!("Removed {} at {}", level, path);

        Ok(())
    }

    /// Replace one scalar field of the node at `path`
    pub fn update_field(&mut self, path: &TreePath, update: FieldUpdate) -> Result<(), EditorError> {
        let (level, id) = self.resolve(path)?;
        let node = self
            .arena
            .node_mut(level, id)
            .ok_or_else(|| EditorError::InvalidPath(path.clone()))?;

        update
            .apply(&mut node.data)
            .map_err(|field| EditorError::FieldNotApplicable { field, level })?;
        self.mark_edited();

        Ok(())
    }

    /// Serialize the tree into the nested package list the API expects.
    ///
    /// Fails with the first incomplete or invalid path in depth-first order.
    pub fn to_flat_payload(&self) -> Result<Vec<CurrencyPackage>, ValidationError> {
        let packages: Vec<CurrencyPackage> = self
            .arena
            .roots()
            .iter()
            .filter_map(|&id| self.package(id))
            .collect();

        validate_packages(&packages)?;

        Ok(packages)
    }

    /// Validate and submit the tree.
    ///
    /// An incomplete tree never reaches `submitter`. On success the tree is reset; on failure
    /// it is kept and the editor enters [`EditorState::SubmitError`].
    pub async fn submit<S: PackageSubmitter>(
        &mut self,
        submitter: &S,
        service_id: &str,
    ) -> Result<Vec<CurrencyPackage>, EditorError> {
        let packages = self.begin_submit()?;
        let result = submitter.submit_packages(service_id, &packages).await;

        self.finish_submit(service_id, result)
    }

    /// Like [`PricingEditor::submit`], but the request is dropped when `registration`'s handle
    /// is aborted. An aborted submission returns [`ApiError::Cancelled`] and resumes editing.
    pub async fn submit_abortable<S: PackageSubmitter>(
        &mut self,
        submitter: &S,
        service_id: &str,
        registration: AbortRegistration,
    ) -> Result<Vec<CurrencyPackage>, EditorError> {
        let packages = self.begin_submit()?;
        let result = Abortable::new(submitter.submit_packages(service_id, &packages), registration)
            .await
            .unwrap_or(Err(ApiError::Cancelled));

        self.finish_submit(service_id, result)
    }

    fn begin_submit(&mut self) -> Result<Vec<CurrencyPackage>, EditorError> {
        let packages = self.to_flat_payload()?;
        self.state = EditorState::Submitting;

        Ok(packages)
    }

    fn finish_submit(
        &mut self,
        service_id: &str,
        result: Result<Vec<CurrencyPackage>, ApiError>,
    ) -> Result<Vec<CurrencyPackage>, EditorError> {
        match result {
            Ok(created) => {
                tracing::info!(
                    "Submitted {} currency packages for service {}",
                    created.len(),
                    service_id
                );
                self.arena.clear();
                self.state = EditorState::Submitted;

                Ok(created)
            }
            Err(ApiError::Cancelled) => {
                tracing::info!("Currency package submission for service {} was cancelled", service_id);
                self.state = EditorState::Editing;

                Err(EditorError::Submit(ApiError::Cancelled))
            }
            Err(err) => {
                tracing::warn!(
                    "Failed to submit currency packages for service {}: {}",
                    service_id,
                    err
                );
                self.state = EditorState::SubmitError(err.clone());

                Err(EditorError::Submit(err))
            }
        }
    }

    fn resolve(&self, path: &TreePath) -> Result<(Level, NodeId), EditorError> {
        self.arena
            .resolve(path)
            .ok_or_else(|| EditorError::InvalidPath(path.clone()))
    }

    /// Any edit starts (or continues) an editing session
    fn mark_edited(&mut self) {
        self.state = EditorState::Editing;
    }

    fn sync_empty(&mut self) {
        self.state = if self.arena.is_empty() {
            EditorState::Empty
        } else {
            EditorState::Editing
        };
    }

    fn children<T>(&self, level: Level, id: NodeId, build: impl Fn(NodeId) -> Option<T>) -> Vec<T> {
        self.arena
            .node(level, id)
            .map(|node| node.children.iter().filter_map(|&child| build(child)).collect())
            .unwrap_or_default()
    }

    fn name(&self, level: Level, id: NodeId) -> Option<String> {
        match &self.arena.node(level, id)?.data {
            NodeData::Named(name) => Some(name.clone()),
            _ => None,
        }
    }

    fn package(&self, id: NodeId) -> Option<CurrencyPackage> {
        let NodeData::Package { amount, unit } = &self.arena.node(Level::Package, id)?.data else {
            return None;
        };

        Some(CurrencyPackage {
            amount: *amount,
            unit: unit.clone(),
            countries: self.children(Level::Package, id, |child| self.country(child)),
        })
    }

    fn country(&self, id: NodeId) -> Option<Country> {
        Some(Country {
            name: self.name(Level::Country, id)?,
            regions: self.children(Level::Country, id, |child| self.region(child)),
        })
    }

    fn region(&self, id: NodeId) -> Option<Region> {
        Some(Region {
            name: self.name(Level::Region, id)?,
            subregions: self.children(Level::Region, id, |child| self.subregion(child)),
        })
    }

    fn subregion(&self, id: NodeId) -> Option<Subregion> {
        Some(Subregion {
            name: self.name(Level::Subregion, id)?,
            prices: self.children(Level::Subregion, id, |child| self.price(child)),
        })
    }

    fn price(&self, id: NodeId) -> Option<Price> {
        let NodeData::Price {
            amount,
            currency_code,
        } = &self.arena.node(Level::Price, id)?.data
        else {
            return None;
        };

        Some(Price {
            amount: *amount,
            currency_code: currency_code.clone(),
        })
    }
}
