//! Directional text entry.
//!
//! A direction tree maps short sequences of directional inputs (d-pad,
//! joystick, swipe) to keys. [`domain::EnumTree`] walks one direction at a
//! time, [`domain::HuffmanBuilder`] lays out keys by frequency and
//! [`application::Writer`] turns the emitted keys into lines of text.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;

pub use application::{AnyWriter, Writer};
pub use domain::{
    Dir4, Dir8, Direction, DomainError, EnumTree, EnumTreeBuilder, HuffmanBuilder,
    PathTreeBuilder,
};
