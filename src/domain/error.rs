//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree construction rules.
/// Traversal never fails: missing children, walking up at the root and
/// unknown action tokens are absorbed silently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("no keys or paths to build a tree from")]
    EmptySource,

    #[error("direction alphabet of size {0} cannot form a code (need at least 2)")]
    ArityTooSmall(usize),

    #[error("unknown direction symbol '{symbol}' in path \"{path}\"")]
    UnknownDirection { symbol: char, path: String },

    #[error("empty direction path for content \"{0}\"")]
    EmptyPath(String),

    #[error("leaf content must not be empty")]
    EmptyContent,

    #[error("key weights sum past u64::MAX")]
    WeightOverflow,

    #[error("duplicate key: \"{0}\"")]
    DuplicateKey(String),

    #[error("path {path} already holds \"{existing}\", cannot place \"{content}\"")]
    PathOccupied {
        path: String,
        existing: String,
        content: String,
    },

    #[error("path {path} runs through leaf \"{existing}\", cannot place \"{content}\"")]
    PathThroughLeaf {
        path: String,
        existing: String,
        content: String,
    },

    #[error("child slot {slot} is already occupied")]
    SlotOccupied { slot: usize },

    #[error("ill-formed tree: {0}")]
    IllFormed(String),
}

/// Result type for tree operations.
pub type DomainResult<T> = Result<T, DomainError>;
