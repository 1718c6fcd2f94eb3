//! Flat per-level storage for the pricing tree.
//!
//! Each level keeps its nodes in its own slot list and nodes refer to their parent by slot
//! index, so adding or removing a node never clones its siblings. Removed nodes leave an
//! empty slot behind; slot indices are never reused while the tree is alive.

use crate::client::editor::{
    field::NodeData,
    path::{Level, TreePath},
};

pub(crate) type NodeId = usize;

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub data: NodeData,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Arena {
    levels: [Vec<Option<Node>>; 5],
    roots: Vec<NodeId>,
}

impl Arena {
    pub fn node(&self, level: Level, id: NodeId) -> Option<&Node> {
        self.levels[level.depth()].get(id).and_then(Option::as_ref)
    }

    pub fn node_mut(&mut self, level: Level, id: NodeId) -> Option<&mut Node> {
        self.levels[level.depth()]
            .get_mut(id)
            .and_then(Option::as_mut)
    }

    /// Packages in insertion order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Resolve a non-root path to the level and slot of its node
    pub fn resolve(&self, path: &TreePath) -> Option<(Level, NodeId)> {
        let (&first, rest) = path.indices().split_first()?;
        let mut level = Level::Package;
        let mut id = *self.roots.get(first)?;

        for &index in rest {
            let child_level = level.child()?;
            id = *self.node(level, id)?.children.get(index)?;
            level = child_level;
        }

        Some((level, id))
    }

    /// Append a node below `parent` (a node of the level above), or as a package when `None`
    pub fn insert(&mut self, level: Level, parent: Option<NodeId>, data: NodeData) -> Option<NodeId> {
        let id = self.levels[level.depth()].len();

        match parent {
            None => self.roots.push(id),
            Some(parent_id) => {
                let parent_level = Level::from_depth(level.depth().checked_sub(1)?)?;
                self.node_mut(parent_level, parent_id)?.children.push(id);
            }
        }

        self.levels[level.depth()].push(Some(Node {
            parent,
            children: Vec::new(),
            data,
        }));

        Some(id)
    }

    /// Remove a node with its whole subtree and detach it from its parent
    pub fn remove(&mut self, level: Level, id: NodeId) {
        let Some(node) = self.levels[level.depth()].get_mut(id).and_then(Option::take) else {
            return;
        };

        match node.parent {
            None => self.roots.retain(|&root| root != id),
            Some(parent_id) => {
                let parent = level
                    .depth()
                    .checked_sub(1)
                    .and_then(Level::from_depth)
                    .and_then(|parent_level| self.node_mut(parent_level, parent_id));
                if let Some(parent) = parent {
                    parent.children.retain(|&child| child != id);
                }
            }
        }

        self.remove_descendants(level, node.children);
    }

    fn remove_descendants(&mut self, level: Level, children: Vec<NodeId>) {
        let Some(child_level) = level.child() else {
            return;
        };

        for child in children {
            if let Some(node) = self.levels[child_level.depth()]
                .get_mut(child)
                .and_then(Option::take)
            {
                self.remove_descendants(child_level, node.children);
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Arena::default();
    }
}
