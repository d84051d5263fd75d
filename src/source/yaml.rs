//! Structured-file (YAML) reader

use super::Layer;
use crate::error::SourceError;
use config::{File, FileFormat, Source};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Read and parse a YAML document into a layer.
///
/// Keys keep the casing they were authored with.
pub fn read_yaml(path: &Path) -> Result<Layer, SourceError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SourceError::NotFound {
            path: path.to_path_buf(),
        },
        _ => SourceError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let entries = File::from_str(&content, FileFormat::Yaml)
        .collect()
        .map_err(|e| SourceError::Yaml {
            path: path.to_path_buf(),
            source: e,
        })?;

    debug!(path = %path.display(), keys = entries.len(), "Parsed YAML configuration");
    Ok(Layer::new(path.display().to_string(), entries))
}
