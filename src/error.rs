//! Error types for layered-config
//!
//! Source readers report failures as [`SourceError`], which keeps "the file
//! does not exist" distinguishable from real read and parse failures. The
//! orchestrator wraps every other failure into a [`LoadError`] tagged with the
//! stage that produced it.

use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a single source reader
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source file is absent. Never surfaced from a load.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },

    #[error("{}:{line}: {reason}", path.display())]
    DotenvSyntax {
        path: PathBuf,
        line: usize,
        reason: &'static str,
    },

    #[error("environment variable {key:?} is not valid unicode")]
    NonUnicode { key: String },
}

impl SourceError {
    /// Whether this error only says the source is absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound { .. })
    }
}

/// Pipeline stage that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Yaml,
    Dotenv,
    Env,
    Unmarshal,
}

/// Failure of a whole load, tagged by stage
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("load yaml: {0}")]
    Yaml(#[source] SourceError),

    #[error("load dotenv: {0}")]
    Dotenv(#[source] SourceError),

    #[error("load env: {0}")]
    Env(#[source] SourceError),

    #[error("unmarshal: {0}")]
    Unmarshal(#[source] config::ConfigError),
}

impl LoadError {
    pub fn stage(&self) -> Stage {
        match self {
            LoadError::Yaml(_) => Stage::Yaml,
            LoadError::Dotenv(_) => Stage::Dotenv,
            LoadError::Env(_) => Stage::Env,
            LoadError::Unmarshal(_) => Stage::Unmarshal,
        }
    }
}

/// Result type alias for loads
pub type Result<T> = std::result::Result<T, LoadError>;
