//! Load options
//!
//! Options are small values produced by the `with_*` constructors and applied
//! in order to a [`LoadOptions`] accumulator before a load starts. When the
//! same option is given twice, the last one wins.

use crate::transform::{DefaultTransform, EnvTransform};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A single load option
#[derive(Debug, Clone)]
pub enum LoadOption {
    /// Structured (YAML) file to read first
    LocalYaml(PathBuf),
    /// Only ingest environment-style keys carrying this prefix
    EnvPrefix(String),
    /// Normalizer used for `.env` and environment pairs
    Transform(Arc<dyn EnvTransform>),
}

/// Read a YAML file as the lowest-precedence source.
///
/// A path that does not exist is skipped without error.
pub fn with_local_yaml(path: impl Into<PathBuf>) -> LoadOption {
    LoadOption::LocalYaml(path.into())
}

/// Restrict `.env` and environment variables to keys starting with `prefix`.
///
/// The prefix is removed before keys are normalized, so `APP_SERVER__PORT`
/// with prefix `APP_` lands on `server.port`.
pub fn with_env_prefix(prefix: impl Into<String>) -> LoadOption {
    LoadOption::EnvPrefix(prefix.into())
}

/// Replace the default key normalizer and value coercer.
pub fn with_transform(transform: impl EnvTransform + 'static) -> LoadOption {
    LoadOption::Transform(Arc::new(transform))
}

/// Resolved options for one load
#[derive(Debug, Clone)]
pub struct LoadOptions {
    local_yaml: Option<PathBuf>,
    env_prefix: Option<String>,
    transform: Arc<dyn EnvTransform>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            local_yaml: None,
            env_prefix: None,
            transform: Arc::new(DefaultTransform),
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply options in sequence
    pub fn apply(&mut self, options: impl IntoIterator<Item = LoadOption>) {
        for option in options {
            match option {
                LoadOption::LocalYaml(path) => self.local_yaml = Some(path),
                LoadOption::EnvPrefix(prefix) => self.env_prefix = Some(prefix),
                LoadOption::Transform(transform) => self.transform = transform,
            }
        }
    }

    pub fn local_yaml(&self) -> Option<&Path> {
        self.local_yaml.as_deref()
    }

    pub fn env_prefix(&self) -> Option<&str> {
        self.env_prefix.as_deref()
    }

    pub fn transform(&self) -> &dyn EnvTransform {
        self.transform.as_ref()
    }
}

impl FromIterator<LoadOption> for LoadOptions {
    fn from_iter<I: IntoIterator<Item = LoadOption>>(iter: I) -> Self {
        let mut options = Self::default();
        options.apply(iter);
        options
    }
}
