//! Typing session over a direction set chosen at runtime.

use itertools::Itertools;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::layout::LayoutFile;
use crate::application::{ApplicationResult, Writer};
use crate::config::{DirectionSet, Settings};
use crate::domain::{Dir4, Dir8, Direction, EnumTreeBuilder, HuffmanBuilder};
use crate::tree_traits::TreeNodeConvert;

/// A [`Writer`] over whichever direction alphabet the settings select.
#[derive(Debug)]
pub enum AnyWriter {
    Four(Writer<Dir4>),
    Eight(Writer<Dir8>),
}

macro_rules! dispatch {
    ($self:expr, $writer:ident => $body:expr) => {
        match $self {
            AnyWriter::Four($writer) => $body,
            AnyWriter::Eight($writer) => $body,
        }
    };
}

fn build_writer<D: Direction>(
    layout: Option<&LayoutFile>,
    keys: &[String],
    capacity: usize,
) -> ApplicationResult<Writer<D>> {
    let tree = match layout {
        Some(layout) => layout.to_builder::<D>()?.build()?,
        None => HuffmanBuilder::<D>::new(keys.iter().cloned()).build()?,
    };
    Ok(Writer::with_capacity(tree, capacity))
}

impl AnyWriter {
    /// Build from settings; `layout` replaces the generated tree when given.
    #[instrument(level = "debug", skip(settings, layout))]
    pub fn build(settings: &Settings, layout: Option<&LayoutFile>) -> ApplicationResult<Self> {
        debug!(
            "directions: {}, layout: {}",
            settings.directions,
            layout.is_some()
        );
        let capacity = settings.history_capacity;
        Ok(match settings.directions {
            DirectionSet::Four => {
                AnyWriter::Four(build_writer(layout, &settings.keys, capacity)?)
            }
            DirectionSet::Eight => {
                AnyWriter::Eight(build_writer(layout, &settings.keys, capacity)?)
            }
        })
    }

    /// Feed a string of direction symbols, returning every emitted character.
    pub fn type_symbols(&mut self, input: &str) -> ApplicationResult<String> {
        dispatch!(self, w => type_on(w, input))
    }

    pub fn line(&self) -> &str {
        dispatch!(self, w => w.line())
    }

    pub fn history_list(&self) -> Vec<&str> {
        dispatch!(self, w => w.history_list())
    }

    pub fn is_caps(&self) -> bool {
        dispatch!(self, w => w.is_caps())
    }

    pub fn is_shift(&self) -> bool {
        dispatch!(self, w => w.is_shift())
    }

    pub fn is_mid_entry(&self) -> bool {
        dispatch!(self, w => w.is_mid_entry())
    }

    /// Every key with its symbol path, shortest paths first.
    pub fn codes(&self) -> Vec<(String, String)> {
        dispatch!(self, w => codes_of(w))
    }

    /// Contents reachable under each direction from the current position.
    pub fn hints(&self) -> Vec<(char, String)> {
        dispatch!(self, w => w
            .subtree_contents()
            .into_iter()
            .map(|(d, contents)| (d.symbol(), contents))
            .collect())
    }

    pub fn to_tree_string(&self) -> Tree<String> {
        dispatch!(self, w => w.tree().to_tree_string())
    }
}

fn type_on<D: Direction>(writer: &mut Writer<D>, input: &str) -> ApplicationResult<String> {
    let path = D::parse_path(input)?;
    Ok(writer.type_path(&path))
}

fn codes_of<D: Direction>(writer: &Writer<D>) -> Vec<(String, String)> {
    writer
        .tree()
        .leaf_paths()
        .into_iter()
        .map(|(content, path)| (content, D::format_path(&path)))
        .sorted_by(|a, b| a.1.len().cmp(&b.1.len()).then_with(|| a.1.cmp(&b.1)))
        .collect()
}
