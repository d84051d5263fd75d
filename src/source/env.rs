//! Process-environment reader

use super::{Layer, env_style_layer};
use crate::error::SourceError;
use crate::transform::EnvTransform;
use std::ffi::OsString;
use tracing::debug;

const ENVIRONMENT: &str = "environment";

/// Read the current process environment into a layer.
pub fn read_env(
    prefix: Option<&str>,
    transform: &dyn EnvTransform,
) -> Result<Layer, SourceError> {
    read_env_from(std::env::vars_os(), prefix, transform)
}

/// Read an explicit set of variables into a layer.
///
/// With a prefix, a matching variable whose name or value is not valid
/// Unicode fails the whole read and variables outside the prefix are never
/// inspected. Without a prefix the reader cannot tell the caller's variables
/// from anyone else's, so such variables are skipped.
pub fn read_env_from<I>(
    vars: I,
    prefix: Option<&str>,
    transform: &dyn EnvTransform,
) -> Result<Layer, SourceError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut pairs = Vec::new();

    for (key, value) in vars {
        if let Some(prefix) = prefix
            && !key.to_string_lossy().starts_with(prefix)
        {
            continue;
        }

        let key = match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => {
                pairs.push((key, value));
                continue;
            }
            (Ok(key), Err(_)) => key,
            (Err(key), _) => key.to_string_lossy().into_owned(),
        };

        if prefix.is_none() {
            debug!(key = %key, "Skipping variable that is not valid unicode");
            continue;
        }
        return Err(SourceError::NonUnicode { key });
    }

    let layer = env_style_layer(ENVIRONMENT, pairs, prefix, transform);
    debug!(keys = layer.len(), "Read environment variables");
    Ok(layer)
}
