use std::fmt;

/// Depth of a node in the pricing tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Package,
    Country,
    Region,
    Subregion,
    Price,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Package,
        Level::Country,
        Level::Region,
        Level::Subregion,
        Level::Price,
    ];

    pub fn depth(self) -> usize {
        match self {
            Level::Package => 0,
            Level::Country => 1,
            Level::Region => 2,
            Level::Subregion => 3,
            Level::Price => 4,
        }
    }

    pub fn from_depth(depth: usize) -> Option<Level> {
        Self::ALL.get(depth).copied()
    }

    /// Level of this level's children; prices have none
    pub fn child(self) -> Option<Level> {
        Self::from_depth(self.depth() + 1)
    }

    /// Name of the list holding nodes of this level
    pub fn collection(self) -> &'static str {
        match self {
            Level::Package => "packages",
            Level::Country => "countries",
            Level::Region => "regions",
            Level::Subregion => "subregions",
            Level::Price => "prices",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Package => "package",
            Level::Country => "country",
            Level::Region => "region",
            Level::Subregion => "subregion",
            Level::Price => "price",
        };
        write!(f, "{}", name)
    }
}

/// Location of a node as one sibling index per level; the empty path is the root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TreePath(Vec<usize>);

impl TreePath {
    pub fn root() -> Self {
        TreePath(Vec::new())
    }

    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        TreePath(indices.into())
    }

    /// Path of the `index`-th child of this node
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        TreePath(indices)
    }

    pub fn parent(&self) -> Option<TreePath> {
        let (_, parent) = self.0.split_last()?;
        Some(TreePath(parent.to_vec()))
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Level of the addressed node; `None` for the root or a path deeper than a price
    pub fn level(&self) -> Option<Level> {
        self.0.len().checked_sub(1).and_then(Level::from_depth)
    }
}

impl From<&[usize]> for TreePath {
    fn from(indices: &[usize]) -> Self {
        TreePath(indices.to_vec())
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "{}", Level::Package.collection());
        }

        for (depth, index) in self.0.iter().enumerate() {
            if depth > 0 {
                write!(f, ".")?;
            }
            match Level::from_depth(depth) {
                Some(level) => write!(f, "{}[{}]", level.collection(), index)?,
                None => write!(f, "[{}]", index)?,
            }
        }

        Ok(())
    }
}
