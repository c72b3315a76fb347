//! Domain layer: direction trees and how they are built
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod direction;
pub mod enum_tree;
pub mod error;
pub mod huffman;

pub use arena::{TreeArena, TreeNode};
pub use builder::{EnumTreeBuilder, PathTreeBuilder};
pub use direction::{Dir4, Dir8, Direction};
pub use enum_tree::EnumTree;
pub use error::{DomainError, DomainResult};
pub use huffman::{first_merge_size, HuffmanBuilder, DEFAULT_KEYS};
