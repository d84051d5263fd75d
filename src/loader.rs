//! Load orchestrator
//!
//! Sources are applied with the following precedence (lowest to highest):
//! 1. YAML file, if `with_local_yaml` was given
//! 2. `.env` file in the working directory
//! 3. Environment variables
//!
//! A source file that does not exist contributes nothing. Any other failure
//! aborts the load and is tagged with the stage that produced it.

use crate::error::{LoadError, Result, SourceError};
use crate::options::{LoadOption, LoadOptions};
use crate::source::{self, DOTENV_FILE, Layer};
use crate::store::MergeStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

/// Load configuration into a new `T`.
///
/// Keys absent from every source take whatever `T`'s `Deserialize` impl
/// does for missing fields, typically `#[serde(default)]`.
pub fn load<T: DeserializeOwned>(options: impl IntoIterator<Item = LoadOption>) -> Result<T> {
    let options: LoadOptions = options.into_iter().collect();
    merge_sources(MergeStore::new(), &options)?
        .materialize()
        .map_err(LoadError::Unmarshal)
}

/// Load configuration into an existing `target`.
///
/// The current contents of `target` form the lowest layer, so fields no
/// source mentions keep their values. On error `target` is not modified.
pub fn load_into<T>(target: &mut T, options: impl IntoIterator<Item = LoadOption>) -> Result<()>
where
    T: Serialize + DeserializeOwned,
{
    let options: LoadOptions = options.into_iter().collect();
    let base = config::Config::try_from(&*target).map_err(LoadError::Unmarshal)?;
    *target = merge_sources(MergeStore::new().ingest(base), &options)?
        .materialize()
        .map_err(LoadError::Unmarshal)?;
    Ok(())
}

fn merge_sources(mut store: MergeStore, options: &LoadOptions) -> Result<MergeStore> {
    if let Some(path) = options.local_yaml() {
        store = absorb(store, source::read_yaml(path), LoadError::Yaml)?;
    }

    let dotenv = source::read_dotenv(
        Path::new(DOTENV_FILE),
        options.env_prefix(),
        options.transform(),
    );
    store = absorb(store, dotenv, LoadError::Dotenv)?;

    let env = source::read_env(options.env_prefix(), options.transform());
    store = absorb(store, env, LoadError::Env)?;

    debug!(layers = store.layers(), "Configuration sources merged");
    Ok(store)
}

/// Ingest a reader's result, skipping absent sources.
fn absorb(
    store: MergeStore,
    read: std::result::Result<Layer, SourceError>,
    tag: fn(SourceError) -> LoadError,
) -> Result<MergeStore> {
    match read {
        Ok(layer) => {
            debug!(source = layer.name(), keys = layer.len(), "Loaded configuration source");
            Ok(store.ingest(layer))
        }
        Err(SourceError::NotFound { path }) => {
            debug!(path = %path.display(), "Configuration source not found, skipping");
            Ok(store)
        }
        Err(e) => Err(tag(e)),
    }
}
