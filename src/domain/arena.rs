use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

/// Tree node in the arena-based direction tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Emitted text for leaves, empty for internal nodes
    pub content: String,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// One slot per direction, indexed by ordinal
    pub children: Box<[Option<Index>]>,
    /// Huffman weight, zero on path-built trees
    pub weight: u64,
}

impl TreeNode {
    fn new(content: String, arity: usize, weight: u64) -> Self {
        Self {
            content,
            parent: None,
            children: vec![None; arity].into_boxed_slice(),
            weight,
        }
    }

    /// Leafness is structural: a node without children is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    pub fn child(&self, slot: usize) -> Option<Index> {
        self.children.get(slot).copied().flatten()
    }

    /// Occupied child slots in ordinal order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, Index)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(slot, child)| child.map(|idx| (slot, idx)))
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.content.is_empty() {
            write!(f, "·")
        } else {
            write!(f, "{}", self.content)
        }
    }
}

/// Arena-based tree with fixed-arity nodes.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Parents are stored as indices, so walking up never needs an owning
/// back-reference. The root exists from construction on and is never
/// replaced; nodes are never removed.
#[derive(Debug, Clone)]
pub struct TreeArena {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node
    root: Index,
    /// Number of child slots per node
    arity: usize,
}

impl TreeArena {
    pub fn new(arity: usize) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode::new(String::new(), arity, 0));
        Self { arena, root, arity }
    }

    /// Insert a detached node. It becomes part of the tree once attached.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, content: String, weight: u64) -> Index {
        let node = TreeNode::new(content, self.arity, weight);
        self.arena.insert(node)
    }

    /// Attach `child` under `parent` at `slot`.
    #[instrument(level = "trace", skip(self))]
    pub fn attach(&mut self, parent: Index, slot: usize, child: Index) -> DomainResult<()> {
        if slot >= self.arity {
            return Err(DomainError::IllFormed(format!(
                "slot {} outside arity {}",
                slot, self.arity
            )));
        }
        let parent_node = self
            .arena
            .get_mut(parent)
            .ok_or_else(|| DomainError::IllFormed("unknown parent index".to_string()))?;
        if parent_node.children[slot].is_some() {
            return Err(DomainError::SlotOccupied { slot });
        }
        parent_node.children[slot] = Some(child);

        let child_node = self
            .arena
            .get_mut(child)
            .ok_or_else(|| DomainError::IllFormed("unknown child index".to_string()))?;
        child_node.parent = Some(parent);
        Ok(())
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub(crate) fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Number of nodes reachable from the root.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.get_node(self.root).map_or(true, TreeNode::is_leaf)
    }

    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.root)
    }

    /// Pre-order iteration over the subtree rooted at `idx`.
    pub fn iter_from(&self, idx: Index) -> TreeIterator<'_> {
        TreeIterator::new(self, idx)
    }

    /// Longest root-to-leaf path, counted in edges.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        match self.get_node(node_idx) {
            Some(node) if !node.is_leaf() => {
                1 + node
                    .occupied()
                    .map(|(_, child)| self.calculate_depth(child))
                    .max()
                    .unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Number of edges between the root and `idx`.
    pub fn depth_of(&self, idx: Index) -> usize {
        self.slots_to(idx).len()
    }

    /// Child slots leading from the root down to `idx`.
    pub fn slots_to(&self, idx: Index) -> Vec<usize> {
        let mut slots = Vec::new();
        let mut current = idx;
        while let Some(parent) = self.get_node(current).and_then(|n| n.parent) {
            if let Some((slot, _)) = self
                .get_node(parent)
                .and_then(|p| p.occupied().find(|&(_, c)| c == current))
            {
                slots.push(slot);
            }
            current = parent;
        }
        slots.reverse();
        slots
    }

    /// Collects the content of all leaf nodes, in depth-first slot order.
    ///
    /// A root-only tree has no leaves.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<String> {
        self.leaf_indices()
            .into_iter()
            .filter_map(|idx| self.get_node(idx).map(|n| n.content.clone()))
            .collect()
    }

    pub fn leaf_indices(&self) -> Vec<Index> {
        if self.is_empty() {
            return Vec::new();
        }
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Non-empty contents of the subtree rooted at `idx`, depth-first.
    pub fn contents_below(&self, idx: Index) -> Vec<&str> {
        self.iter_from(idx)
            .filter(|(_, node)| !node.content.is_empty())
            .map(|(_, node)| node.content.as_str())
            .collect()
    }

    /// Leaves carry content and internal nodes don't.
    ///
    /// A lone root is the empty no-op tree and passes.
    #[instrument(level = "debug", skip(self))]
    pub fn check_well_formed(&self) -> DomainResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        for (idx, node) in self.iter() {
            if node.is_leaf() && node.content.is_empty() {
                return Err(DomainError::IllFormed(format!(
                    "leaf at slots {:?} has no content",
                    self.slots_to(idx)
                )));
            }
            if !node.is_leaf() && !node.content.is_empty() {
                return Err(DomainError::IllFormed(format!(
                    "internal node at slots {:?} carries \"{}\"",
                    self.slots_to(idx),
                    node.content
                )));
            }
        }
        Ok(())
    }
}

impl std::ops::Index<Index> for TreeArena {
    type Output = TreeNode;

    /// Nodes are never removed, so every index handed out by this arena stays valid.
    fn index(&self, idx: Index) -> &TreeNode {
        &self.arena[idx]
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena, start: Index) -> Self {
        Self {
            arena,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for slot-order traversal
                for (_, child) in node.occupied().collect::<Vec<_>>().into_iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
