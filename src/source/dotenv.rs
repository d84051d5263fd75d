//! Dotenv-file reader
//!
//! Grammar, one entry per line:
//!
//! ```text
//! # comment
//! KEY=raw value, kept verbatim apart from surrounding whitespace
//! KEY=value # inline comment
//! export KEY=value
//! KEY="double quoted, \n \" \\ escapes"
//! KEY='single quoted, literal' # comment
//! ```
//!
//! An inline comment starts at a `#` preceded by whitespace, so `p@ss#word`
//! stays whole. Unquoted values are otherwise never split or unescaped, and
//! embedded JSON such as `FLAGS={"debug": true}` reaches the coercer
//! untouched. Quote a value to keep a ` #` inside it.

use super::{Layer, env_style_layer};
use crate::error::SourceError;
use crate::transform::EnvTransform;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Name of the dotenv file, resolved against the working directory
pub const DOTENV_FILE: &str = ".env";

/// Read a dotenv file into a layer without touching the process environment.
///
/// Every value goes through `transform`, exactly as for process environment
/// variables.
pub fn read_dotenv(
    path: &Path,
    prefix: Option<&str>,
    transform: &dyn EnvTransform,
) -> Result<Layer, SourceError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SourceError::NotFound {
            path: path.to_path_buf(),
        },
        _ => SourceError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let pairs = parse(&content).map_err(|(line, reason)| SourceError::DotenvSyntax {
        path: path.to_path_buf(),
        line,
        reason,
    })?;

    let layer = env_style_layer(path.display().to_string(), pairs, prefix, transform);
    debug!(path = %path.display(), keys = layer.len(), "Parsed dotenv file");
    Ok(layer)
}

/// Parse dotenv content into ordered pairs. Errors carry a 1-based line number.
fn parse(content: &str) -> Result<Vec<(String, String)>, (usize, &'static str)> {
    let mut pairs = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").map(str::trim_start).unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            return Err((index + 1, "expected KEY=value"));
        };

        let key = key.trim();
        if key.is_empty() {
            return Err((index + 1, "empty key"));
        }
        if key.chars().any(char::is_whitespace) {
            return Err((index + 1, "whitespace in key"));
        }

        let value = parse_value(value).map_err(|reason| (index + 1, reason))?;
        pairs.push((key.to_string(), value));
    }

    Ok(pairs)
}

fn parse_value(raw: &str) -> Result<String, &'static str> {
    let value = raw.trim_start();
    match value.chars().next() {
        Some(quote @ ('"' | '\'')) => parse_quoted(&value[1..], quote),
        _ => Ok(strip_inline_comment(raw).trim().to_string()),
    }
}

fn strip_inline_comment(raw: &str) -> &str {
    let mut previous = None;
    for (index, c) in raw.char_indices() {
        if c == '#' && previous.is_some_and(char::is_whitespace) {
            return &raw[..index];
        }
        previous = Some(c);
    }
    raw
}

/// Parse the remainder of a quoted value, `body` starting after the opening
/// quote. Only whitespace or a comment may follow the closing quote.
fn parse_quoted(body: &str, quote: char) -> Result<String, &'static str> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices();

    let rest = loop {
        let Some((index, c)) = chars.next() else {
            return Err("unterminated quoted value");
        };
        if c == quote {
            break &body[index + c.len_utf8()..];
        }
        if c != '\\' || quote == '\'' {
            out.push(c);
            continue;
        }
        match chars.next().map(|(_, escaped)| escaped) {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => return Err("unterminated quoted value"),
        }
    };

    let trailing = rest.trim_start();
    if trailing.is_empty() || (trailing.starts_with('#') && trailing.len() < rest.len()) {
        Ok(out)
    } else {
        Err("unexpected text after quoted value")
    }
}
