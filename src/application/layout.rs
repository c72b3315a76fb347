//! Flat layout format: content mapped to a string of direction symbols.
//!
//! ```toml
//! [paths]
//! "h" = "UL"
//! "i" = "UD"
//! "<enter>" = "LU"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Direction, DomainError, PathTreeBuilder};

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct LayoutFile {
    #[serde(default)]
    pub paths: BTreeMap<String, String>,
}

impl LayoutFile {
    /// Parse layout text; `origin` only labels errors.
    pub fn parse(content: &str, origin: &Path) -> ApplicationResult<Self> {
        let layout: LayoutFile = toml::from_str(content).map_err(|e| ApplicationError::Layout {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        if layout.paths.is_empty() {
            return Err(DomainError::EmptySource.into());
        }
        Ok(layout)
    }

    pub fn to_builder<D: Direction>(&self) -> ApplicationResult<PathTreeBuilder<D>> {
        Ok(PathTreeBuilder::from_symbols(
            self.paths.iter().map(|(content, path)| (content.as_str(), path.as_str())),
        )?)
    }
}
