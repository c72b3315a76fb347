//! Infrastructure layer: file I/O
//!
//! This layer reads layout files and wires up writers from settings.

pub mod error;
pub mod layout;

pub use error::{InfraError, InfraResult};
pub use layout::{load_layout, writer_from_settings};
