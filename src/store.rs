//! Merge store
//!
//! Accumulates layers in ingestion order on top of `config`'s builder. When
//! the store is materialized the builder replays every layer into one tree:
//! tables merge key by key, anything else (scalars and lists alike) replaces
//! what was there, and keys a later layer omits are left untouched.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Source};
use serde::de::DeserializeOwned;
use tracing::trace;

/// Ordered-overwrite key tree
#[derive(Debug, Default)]
pub struct MergeStore {
    builder: ConfigBuilder<DefaultState>,
    layers: usize,
}

impl MergeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer above every layer ingested so far
    pub fn ingest<S>(mut self, layer: S) -> Self
    where
        S: Source + Send + Sync + 'static,
    {
        self.layers += 1;
        trace!(layer = self.layers, "Ingesting configuration layer");
        self.builder = self.builder.add_source(layer);
        self
    }

    /// Number of layers ingested
    pub fn layers(&self) -> usize {
        self.layers
    }

    /// Merge all layers into a single tree
    pub fn build(self) -> Result<Config, ConfigError> {
        self.builder.build()
    }

    /// Merge all layers and decode the result into `T`
    pub fn materialize<T: DeserializeOwned>(self) -> Result<T, ConfigError> {
        self.build()?.try_deserialize()
    }
}
