//! Cursor-driven navigation over a direction tree.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::TreeArena;
use crate::domain::direction::Direction;
use crate::domain::error::{DomainError, DomainResult};

/// A direction tree plus a cursor.
///
/// Callers drive the cursor one direction at a time with [`EnumTree::walk_down`];
/// the tree itself only changes while it is being built.
#[derive(Debug, Clone)]
pub struct EnumTree<D: Direction> {
    arena: TreeArena,
    cursor: Index,
    _directions: PhantomData<D>,
}

impl<D: Direction> Default for EnumTree<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Direction> EnumTree<D> {
    /// An empty tree: a lone root, cursor on it.
    pub fn new() -> Self {
        Self::from_arena(TreeArena::new(D::arity()))
    }

    pub(crate) fn from_arena(arena: TreeArena) -> Self {
        let cursor = arena.root();
        Self {
            arena,
            cursor,
            _directions: PhantomData,
        }
    }

    /// Move the cursor to the child under `direction`.
    ///
    /// Stays put on a leaf or when there is no such child. Returns the
    /// content of the node the cursor ends on, empty for internal nodes.
    #[instrument(level = "trace", skip(self))]
    pub fn walk_down(&mut self, direction: D) -> &str {
        let node = &self.arena[self.cursor];
        if !node.is_leaf() {
            match node.child(direction.ordinal()) {
                Some(next) => self.cursor = next,
                None => trace!("no child under {:?}, cursor stays", direction),
            }
        }
        &self.arena[self.cursor].content
    }

    /// Move the cursor to its parent; the root stays the root.
    pub fn walk_up(&mut self) {
        if let Some(parent) = self.arena[self.cursor].parent {
            self.cursor = parent;
        }
    }

    pub fn rewind(&mut self) {
        self.cursor = self.arena.root();
    }

    pub fn is_leaf(&self) -> bool {
        self.arena[self.cursor].is_leaf()
    }

    pub fn is_at_root(&self) -> bool {
        self.cursor == self.arena.root()
    }

    pub fn current_content(&self) -> &str {
        &self.arena[self.cursor].content
    }

    /// Directions taken from the root to the cursor.
    pub fn current_path(&self) -> Vec<D> {
        self.to_directions(self.arena.slots_to(self.cursor))
    }

    /// Place `content` at the end of `path`, creating empty internal nodes
    /// for every missing step.
    ///
    /// Inserting the same content at the same leaf twice is accepted. The
    /// tree is left untouched when an error is returned.
    #[instrument(level = "debug", skip(self))]
    pub fn insert_path(&mut self, content: &str, path: &[D]) -> DomainResult<()> {
        if content.is_empty() {
            return Err(DomainError::EmptyContent);
        }
        let Some((last, prefix)) = path.split_last() else {
            return Err(DomainError::EmptyPath(content.to_string()));
        };

        // Dry walk first so a rejected insert creates no dangling nodes.
        let mut current = Some(self.arena.root());
        for (i, direction) in prefix.iter().enumerate() {
            let Some(idx) = current else { break };
            current = self.arena[idx].child(direction.ordinal());
            if let Some(next) = current {
                let node = &self.arena[next];
                if node.is_leaf() {
                    return Err(DomainError::PathThroughLeaf {
                        path: D::format_path(&path[..=i]),
                        existing: node.content.clone(),
                        content: content.to_string(),
                    });
                }
            }
        }
        if let Some(terminal) = current.and_then(|idx| self.arena[idx].child(last.ordinal())) {
            let node = &self.arena[terminal];
            if node.is_leaf() && node.content == content {
                debug!("\"{}\" already at {}", content, D::format_path(path));
                return Ok(());
            }
            return Err(DomainError::PathOccupied {
                path: D::format_path(path),
                existing: node.content.clone(),
                content: content.to_string(),
            });
        }

        let mut current = self.arena.root();
        for direction in prefix {
            current = match self.arena[current].child(direction.ordinal()) {
                Some(next) => next,
                None => {
                    let next = self.arena.insert_node(String::new(), 0);
                    self.arena.attach(current, direction.ordinal(), next)?;
                    next
                }
            };
        }
        let leaf = self.arena.insert_node(content.to_string(), 0);
        self.arena.attach(current, last.ordinal(), leaf)?;
        trace!("placed \"{}\" at {}", content, D::format_path(path));
        Ok(())
    }

    /// Attach a new leaf under the cursor.
    #[instrument(level = "debug", skip(self))]
    pub fn insert_child_at_current(&mut self, content: &str, direction: D) -> DomainResult<()> {
        if content.is_empty() {
            return Err(DomainError::EmptyContent);
        }
        if !self.is_at_root() && self.is_leaf() {
            return Err(DomainError::PathThroughLeaf {
                path: D::format_path(&self.current_path()),
                existing: self.current_content().to_string(),
                content: content.to_string(),
            });
        }
        if self.arena[self.cursor].child(direction.ordinal()).is_some() {
            return Err(DomainError::SlotOccupied {
                slot: direction.ordinal(),
            });
        }
        let leaf = self.arena.insert_node(content.to_string(), 0);
        self.arena.attach(self.cursor, direction.ordinal(), leaf)
    }

    /// For each child of the cursor, the space-joined contents of its
    /// subtree in depth-first order. Empty when the cursor is a leaf.
    pub fn subtree_contents(&self) -> BTreeMap<D, String> {
        self.arena[self.cursor]
            .occupied()
            .filter_map(|(slot, child)| {
                D::from_ordinal(slot).map(|d| (d, self.arena.contents_below(child).join(" ")))
            })
            .collect()
    }

    /// Longest root-to-leaf path in edges.
    pub fn depth(&self) -> usize {
        self.arena.depth()
    }

    pub fn leaf_count(&self) -> usize {
        self.arena.leaf_indices().len()
    }

    /// Every leaf with the directions leading to it, depth-first.
    pub fn leaf_paths(&self) -> Vec<(String, Vec<D>)> {
        self.arena
            .leaf_indices()
            .into_iter()
            .map(|idx| {
                (
                    self.arena[idx].content.clone(),
                    self.to_directions(self.arena.slots_to(idx)),
                )
            })
            .collect()
    }

    /// Directions leading to the leaf holding `content`, if any.
    pub fn path_of(&self, content: &str) -> Option<Vec<D>> {
        self.arena
            .leaf_indices()
            .into_iter()
            .find(|&idx| self.arena[idx].content == content)
            .map(|idx| self.to_directions(self.arena.slots_to(idx)))
    }

    pub fn arena(&self) -> &TreeArena {
        &self.arena
    }

    fn to_directions(&self, slots: Vec<usize>) -> Vec<D> {
        slots.into_iter().filter_map(D::from_ordinal).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::direction::Dir4::{self, *};

    #[test]
    fn test_insert_path_creates_intermediate_nodes() {
        let mut tree = EnumTree::<Dir4>::new();
        tree.insert_path("hi", &[Up, Left]).unwrap();
        assert_eq!(tree.arena().len(), 3);
        assert!(tree.arena().check_well_formed().is_ok());
    }

    #[test]
    fn test_rejected_insert_leaves_tree_untouched() {
        let mut tree = EnumTree::<Dir4>::new();
        tree.insert_path("a", &[Up]).unwrap();
        let before = tree.arena().len();

        let result = tree.insert_path("b", &[Up, Down, Left]);

        assert!(matches!(result, Err(DomainError::PathThroughLeaf { .. })));
        assert_eq!(tree.arena().len(), before);
    }

    #[test]
    fn test_current_path_follows_cursor() {
        let mut tree = EnumTree::<Dir4>::new();
        tree.insert_path("x", &[Right, Down, Up]).unwrap();
        tree.walk_down(Right);
        tree.walk_down(Down);
        assert_eq!(tree.current_path(), vec![Right, Down]);
    }
}
