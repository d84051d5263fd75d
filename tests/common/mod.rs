//! Common test utilities and fixtures.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Initialize tracing for tests.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TestConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub feature_flags: HashMap<String, bool>,
}

/// Scratch working directory plus environment variables, both undone on drop.
///
/// Tests using this must be `#[serial_test::serial]`: the working directory
/// and the environment are process-wide.
pub struct Sandbox {
    dir: TempDir,
    previous_dir: PathBuf,
    vars: Vec<String>,
}

impl Sandbox {
    pub fn new() -> Self {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        let previous_dir = env::current_dir().unwrap();
        env::set_current_dir(dir.path()).unwrap();

        Self {
            dir,
            previous_dir,
            vars: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file into the sandbox and return its absolute path
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn dotenv(&self, content: &str) -> PathBuf {
        self.write(".env", content)
    }

    pub fn set_var(&mut self, key: &str, value: &str) {
        unsafe {
            env::set_var(key, value);
        }
        self.vars.push(key.to_string());
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        for key in &self.vars {
            unsafe {
                env::remove_var(key);
            }
        }
        let _ = env::set_current_dir(&self.previous_dir);
    }
}
