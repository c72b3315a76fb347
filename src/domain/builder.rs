//! Tree builders: sources that produce a ready-to-walk [`EnumTree`].

use tracing::{debug, instrument};

use crate::domain::direction::Direction;
use crate::domain::enum_tree::EnumTree;
use crate::domain::error::{DomainError, DomainResult};

/// Anything that can produce an [`EnumTree`].
///
/// Build errors surface before any traversal happens.
pub trait EnumTreeBuilder<D: Direction> {
    fn build(&self) -> DomainResult<EnumTree<D>>;
}

/// Builds a tree from an explicit content to path mapping.
#[derive(Debug, Clone)]
pub struct PathTreeBuilder<D: Direction> {
    paths: Vec<(String, Vec<D>)>,
}

impl<D: Direction> Default for PathTreeBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Direction> PathTreeBuilder<D> {
    pub fn new() -> Self {
        Self { paths: Vec::new() }
    }

    pub fn path(mut self, content: impl Into<String>, path: Vec<D>) -> Self {
        self.paths.push((content.into(), path));
        self
    }

    /// Build from pairs whose paths are written as direction symbols, e.g. `("h", "UL")`.
    pub fn from_symbols<I, K, P>(entries: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: AsRef<str>,
    {
        let paths = entries
            .into_iter()
            .map(|(content, path)| Ok((content.into(), D::parse_path(path.as_ref())?)))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Self { paths })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<D: Direction> EnumTreeBuilder<D> for PathTreeBuilder<D> {
    #[instrument(level = "debug", skip(self), fields(paths = self.paths.len()))]
    fn build(&self) -> DomainResult<EnumTree<D>> {
        if self.paths.is_empty() {
            return Err(DomainError::EmptySource);
        }
        let mut tree = EnumTree::new();
        for (content, path) in &self.paths {
            tree.insert_path(content, path)?;
        }
        tree.arena().check_well_formed()?;
        debug!(
            "built tree with {} leaves, depth {}",
            tree.leaf_count(),
            tree.depth()
        );
        Ok(tree)
    }
}
