//! Application layer: the writer and tree assembly
//!
//! This layer turns domain trees into a typing session and picks the tree
//! source the settings ask for.

pub mod error;
pub mod layout;
pub mod session;
pub mod writer;

pub use error::{ApplicationError, ApplicationResult};
pub use layout::LayoutFile;
pub use session::AnyWriter;
pub use writer::{control, Action, Keystroke, Writer, DEFAULT_HISTORY_CAPACITY};
