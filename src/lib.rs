//! Layered configuration loading
//!
//! Merges configuration from up to three sources into one typed structure.
//!
//! ## Precedence
//!
//! ```text
//! YAML file (optional) → .env file → environment variables
//! ```
//!
//! Later sources overwrite earlier ones key by key. A source file that does
//! not exist is skipped; any other read or parse failure aborts the load.
//!
//! ## Environment-style keys
//!
//! - Keys are lower-cased; `__` separates nesting levels
//!   (`DATABASE__HOST` → `database.host`)
//! - Values shaped like `{...}` or `[...]` are decoded as JSON when they parse,
//!   and kept as plain strings otherwise
//!
//! ## Example
//!
//! ```no_run
//! use layered_config::{load, with_local_yaml};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize)]
//! #[serde(default)]
//! struct Database {
//!     host: String,
//!     port: u16,
//! }
//!
//! #[derive(Debug, Default, Deserialize)]
//! #[serde(default)]
//! struct AppConfig {
//!     database: Database,
//! }
//!
//! let config: AppConfig = load([with_local_yaml("config.yaml")])?;
//! println!("connecting to {}:{}", config.database.host, config.database.port);
//! # Ok::<(), layered_config::LoadError>(())
//! ```

pub mod error;
pub mod options;
pub mod source;
pub mod store;
pub mod transform;
pub mod types;

mod loader;

// Re-export main types
pub use error::{LoadError, Result, SourceError, Stage};
pub use loader::{load, load_into};
pub use options::{LoadOption, LoadOptions, with_env_prefix, with_local_yaml, with_transform};
pub use store::MergeStore;
pub use transform::{DefaultTransform, EnvTransform};
pub use types::Duration;
