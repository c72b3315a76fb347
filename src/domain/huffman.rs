//! Generates direction trees as n-ary Huffman codes.
//!
//! Keys come ordered by descending frequency. Frequent keys end up on short
//! paths, and every path is a prefix-free code word over the direction
//! alphabet.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};
use std::marker::PhantomData;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::TreeArena;
use crate::domain::builder::EnumTreeBuilder;
use crate::domain::direction::Direction;
use crate::domain::enum_tree::EnumTree;
use crate::domain::error::{DomainError, DomainResult};

/// English key set ordered by descending frequency, action tokens included.
pub const DEFAULT_KEYS: &[&str] = &[
    " ", "e", "t", "a", "o", "i", "n", "<bksp>", "<enter>", "<shift>", "s", "h", "r", "l", "d",
    "c", "u", "<caps>", ".", ",", "f", "m", "w", "y", "p", "g", "b", "v", "k", "x", "j", "q", "z",
    "?", ";", "'", "-", "%", "$", "<sym>", "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
];

/// Working-set entry. Ordered by weight, then by insertion sequence, so equal
/// weights leave the queue first-in first-out.
#[derive(Debug)]
struct QueueEntry {
    weight: u64,
    seq: u64,
    idx: Index,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.weight, self.seq).cmp(&(other.weight, other.seq))
    }
}

/// Number of nodes the first merge takes so that every later merge takes
/// exactly `arity`.
///
/// A full `m`-ary tree with `k` leaves satisfies `k ≡ 1 (mod m-1)`. Merging
/// `a` nodes turns a forest of `n` trees into `n - a + 1`, so choosing
/// `a ≡ n (mod m-1)` with `2 <= a <= m` leaves `n - a + 1 ≡ 1 (mod m-1)` trees.
/// Each later merge of `m` trees removes `m - 1` and keeps that residue, so
/// the forest shrinks to exactly one tree. A single key merges alone.
pub fn first_merge_size(keys: usize, arity: usize) -> usize {
    match keys {
        0 => 0,
        1 => 1,
        n => 2 + (n - 2) % (arity - 1),
    }
}

/// Builds an [`EnumTree`] by generating an n-ary Huffman code.
#[derive(Debug, Clone)]
pub struct HuffmanBuilder<D: Direction> {
    keys: Vec<(String, u64)>,
    _directions: PhantomData<D>,
}

impl<D: Direction> HuffmanBuilder<D> {
    /// Keys ordered by descending frequency; weights derive from rank, the
    /// first of `n` keys weighing `n` and the last `1`.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        let n = keys.len() as u64;
        Self::with_weights(
            keys.into_iter()
                .enumerate()
                .map(|(rank, key)| (key, n - rank as u64)),
        )
    }

    /// Keys with explicit frequencies.
    pub fn with_weights<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(|(k, w)| (k.into(), w)).collect(),
            _directions: PhantomData,
        }
    }

    /// The frequency-ordered English key set.
    pub fn default_keys() -> Self {
        Self::new(DEFAULT_KEYS.iter().copied())
    }

    fn validate(&self) -> DomainResult<()> {
        let arity = D::arity();
        if arity < 2 {
            return Err(DomainError::ArityTooSmall(arity));
        }
        let mut seen = HashSet::new();
        for (key, _) in &self.keys {
            if key.is_empty() {
                return Err(DomainError::EmptyContent);
            }
            if !seen.insert(key.as_str()) {
                return Err(DomainError::DuplicateKey(key.clone()));
            }
        }
        Ok(())
    }
}

impl<D: Direction> EnumTreeBuilder<D> for HuffmanBuilder<D> {
    /// Zero keys give a root-only tree that never emits anything.
    #[instrument(level = "debug", skip(self), fields(keys = self.keys.len()))]
    fn build(&self) -> DomainResult<EnumTree<D>> {
        self.validate()?;
        let arity = D::arity();
        let mut arena = TreeArena::new(arity);
        if self.keys.is_empty() {
            debug!("no keys, returning root-only tree");
            return Ok(EnumTree::from_arena(arena));
        }

        let mut queue = BinaryHeap::new();
        let mut seq = 0u64;
        for (key, weight) in &self.keys {
            let idx = arena.insert_node(key.clone(), *weight);
            queue.push(Reverse(QueueEntry {
                weight: *weight,
                seq,
                idx,
            }));
            seq += 1;
        }

        let mut take = first_merge_size(self.keys.len(), arity);
        debug!("first merge takes {} of {} nodes", take, self.keys.len());
        loop {
            let mut group: Vec<QueueEntry> = (0..take)
                .filter_map(|_| queue.pop().map(|Reverse(entry)| entry))
                .collect();
            let weight = group
                .iter()
                .try_fold(0u64, |acc, e| acc.checked_add(e.weight))
                .ok_or(DomainError::WeightOverflow)?;

            // The last merge fills the existing root.
            let is_last = queue.is_empty();
            let parent = if is_last {
                arena.root()
            } else {
                arena.insert_node(String::new(), weight)
            };

            // Heaviest first onto the lowest ordinals; FIFO among equals.
            group.sort_by(|a, b| b.weight.cmp(&a.weight).then(a.seq.cmp(&b.seq)));
            for (slot, entry) in group.iter().enumerate() {
                arena.attach(parent, slot, entry.idx)?;
            }
            trace!("merged {} nodes, weight {}", group.len(), weight);

            if is_last {
                if let Some(root) = arena.get_node_mut(parent) {
                    root.weight = weight;
                }
                break;
            }
            queue.push(Reverse(QueueEntry {
                weight,
                seq,
                idx: parent,
            }));
            seq += 1;
            take = arity;
        }

        arena.check_well_formed()?;
        let tree = EnumTree::from_arena(arena);
        debug!(
            "built tree with {} leaves, depth {}",
            tree.leaf_count(),
            tree.depth()
        );
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 4, 0)]
    #[case(1, 4, 1)]
    #[case(2, 4, 2)]
    #[case(4, 4, 4)]
    #[case(5, 4, 2)]
    #[case(6, 4, 3)]
    #[case(7, 4, 4)]
    #[case(4, 3, 2)]
    #[case(5, 3, 3)]
    #[case(5, 2, 2)]
    #[case(50, 4, 2)]
    #[case(50, 8, 8)]
    fn test_first_merge_size(#[case] keys: usize, #[case] arity: usize, #[case] expected: usize) {
        assert_eq!(first_merge_size(keys, arity), expected);
    }

    #[rstest]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(8)]
    fn test_merges_always_end_with_one_tree(#[case] arity: usize) {
        for n in 1..200 {
            let mut remaining = n - first_merge_size(n, arity) + 1;
            while remaining > 1 {
                assert!(remaining >= arity, "n={} arity={} stuck at {}", n, arity, remaining);
                remaining -= arity - 1;
            }
            assert_eq!(remaining, 1);
        }
    }

    #[test]
    fn test_queue_entry_breaks_ties_fifo() {
        let mut arena = TreeArena::new(2);
        let a = arena.insert_node("a".into(), 3);
        let b = arena.insert_node("b".into(), 3);
        let mut queue = BinaryHeap::new();
        queue.push(Reverse(QueueEntry { weight: 3, seq: 1, idx: b }));
        queue.push(Reverse(QueueEntry { weight: 3, seq: 0, idx: a }));
        assert_eq!(queue.pop().map(|Reverse(e)| e.idx), Some(a));
        assert_eq!(queue.pop().map(|Reverse(e)| e.idx), Some(b));
    }
}
