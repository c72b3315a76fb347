//! Direction alphabets used as edge labels.

use std::fmt;
use std::hash::Hash;

use crate::domain::error::{DomainError, DomainResult};

/// A closed, ordered set of direction symbols.
///
/// `ALL` lists every symbol in ordinal order; `ALL[d.ordinal()] == d` must
/// hold. Child slots of a tree node are indexed by ordinal, so the alphabet
/// size fixes the arity of every tree built over it.
pub trait Direction: Copy + Eq + Ord + Hash + fmt::Debug + 'static {
    const ALL: &'static [Self];

    /// Position of this direction in [`Direction::ALL`].
    fn ordinal(self) -> usize;

    /// Single-character form used in layout files and typed input.
    fn symbol(self) -> char;

    fn arity() -> usize {
        Self::ALL.len()
    }

    fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.symbol() == symbol)
    }

    /// Parse a string of direction symbols, skipping whitespace.
    fn parse_path(path: &str) -> DomainResult<Vec<Self>> {
        path.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                Self::from_symbol(c).ok_or_else(|| DomainError::UnknownDirection {
                    symbol: c,
                    path: path.to_string(),
                })
            })
            .collect()
    }

    /// Render a path back into its symbol string.
    fn format_path(path: &[Self]) -> String {
        path.iter().map(|d| d.symbol()).collect()
    }
}

/// Four-way directional input (d-pad, arrow keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dir4 {
    Up,
    Down,
    Left,
    Right,
}

impl Direction for Dir4 {
    const ALL: &'static [Self] = &[Dir4::Up, Dir4::Down, Dir4::Left, Dir4::Right];

    fn ordinal(self) -> usize {
        self as usize
    }

    fn symbol(self) -> char {
        match self {
            Dir4::Up => 'U',
            Dir4::Down => 'D',
            Dir4::Left => 'L',
            Dir4::Right => 'R',
        }
    }
}

/// Eight-way directional input, symbols follow the numeric keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dir8 {
    UpLeft,
    Up,
    UpRight,
    Left,
    Right,
    DownLeft,
    Down,
    DownRight,
}

impl Direction for Dir8 {
    const ALL: &'static [Self] = &[
        Dir8::UpLeft,
        Dir8::Up,
        Dir8::UpRight,
        Dir8::Left,
        Dir8::Right,
        Dir8::DownLeft,
        Dir8::Down,
        Dir8::DownRight,
    ];

    fn ordinal(self) -> usize {
        self as usize
    }

    fn symbol(self) -> char {
        match self {
            Dir8::UpLeft => '7',
            Dir8::Up => '8',
            Dir8::UpRight => '9',
            Dir8::Left => '4',
            Dir8::Right => '6',
            Dir8::DownLeft => '1',
            Dir8::Down => '2',
            Dir8::DownRight => '3',
        }
    }
}
