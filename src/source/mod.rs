//! Source readers
//!
//! Each reader produces one [`Layer`]: a partial key tree ready to be
//! ingested by the [`MergeStore`](crate::store::MergeStore). Absence of a
//! source file is reported as [`SourceError::NotFound`] and left for the
//! orchestrator to skip.
//!
//! [`SourceError::NotFound`]: crate::error::SourceError::NotFound

mod dotenv;
mod env;
mod yaml;

pub use dotenv::{DOTENV_FILE, read_dotenv};
pub use env::{read_env, read_env_from};
pub use yaml::read_yaml;

use crate::transform::EnvTransform;
use config::{ConfigError, Map, Source, Value, ValueKind};
use tracing::debug;

/// Partial key tree contributed by one source
#[derive(Debug, Clone)]
pub struct Layer {
    name: String,
    entries: Map<String, Value>,
}

impl Layer {
    pub fn new(name: impl Into<String>, entries: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Human-readable origin, used in logs
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of top-level entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a value by dot-separated path, walking nested tables
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.entries.get(segments.next()?)?;
        for segment in segments {
            match &current.kind {
                ValueKind::Table(table) => current = table.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }
}

impl Source for Layer {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        Ok(self.entries.clone())
    }
}

/// Build a layer from flat environment-style pairs.
///
/// Pairs whose key lacks `prefix` are dropped and the prefix is stripped
/// from the rest. The remaining key goes through `transform` and is split on
/// the transform's delimiter into nested tables, one literal segment per
/// level. Keys containing `[` or `]` are dropped: `config` reads those as
/// array subscripts when it merges the layer. Later pairs overwrite earlier
/// ones with the same key.
pub(crate) fn env_style_layer<I>(
    name: impl Into<String>,
    pairs: I,
    prefix: Option<&str>,
    transform: &dyn EnvTransform,
) -> Layer
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut entries = Map::new();

    for (raw_key, raw_value) in pairs {
        let stripped = match prefix {
            Some(prefix) => match raw_key.strip_prefix(prefix) {
                Some(rest) => rest,
                None => continue,
            },
            None => raw_key.as_str(),
        };
        if stripped.is_empty() {
            continue;
        }

        let (key, value) = transform.transform(stripped, &raw_value);
        if key.contains(['[', ']']) {
            debug!(key = %raw_key, "Skipping variable with subscript characters in its name");
            continue;
        }

        let segments: Vec<&str> = key.split(transform.delimiter()).collect();
        insert_path(&mut entries, &segments, value);
    }

    Layer::new(name, entries)
}

fn insert_path(table: &mut Map<String, Value>, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [last] => {
            table.insert(last.to_string(), value);
        }
        [first, rest @ ..] => {
            let slot = table.entry(first.to_string()).or_insert_with(empty_table);
            if !matches!(slot.kind, ValueKind::Table(_)) {
                *slot = empty_table();
            }
            if let ValueKind::Table(child) = &mut slot.kind {
                insert_path(child, rest, value);
            }
        }
    }
}

fn empty_table() -> Value {
    Value::new(None, ValueKind::Table(Map::new()))
}
