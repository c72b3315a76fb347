//! Layout files on disk.

use std::path::Path;

use tracing::{debug, instrument};

use crate::application::{AnyWriter, LayoutFile};
use crate::config::Settings;
use crate::infrastructure::{InfraError, InfraResult};

/// Read and parse a layout file.
#[instrument(level = "debug")]
pub fn load_layout(path: &Path) -> InfraResult<LayoutFile> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| InfraError::io(format!("read layout {}", path.display()), e))?;
    let layout = LayoutFile::parse(&content, path)?;
    debug!("{} paths in {}", layout.paths.len(), path.display());
    Ok(layout)
}

/// Build the writer the settings describe, reading the layout file if one is set.
pub fn writer_from_settings(settings: &Settings) -> InfraResult<AnyWriter> {
    let layout = settings.layout.as_deref().map(load_layout).transpose()?;
    Ok(AnyWriter::build(settings, layout.as_ref())?)
}
