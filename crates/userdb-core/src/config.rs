//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::CoreError;
use crate::Result;

const DEFAULT_BATCH_SIZE: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Users written per transaction when seeding
    pub batch_size: usize,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("userdb.db"),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn data_dir() -> PathBuf {
        platform_data_dir()
            .map(|d| d.join("userdb"))
            .unwrap_or_else(|| PathBuf::from(".userdb"))
    }

    /// Defaults overridden by `USERDB_DATABASE_PATH` and `USERDB_BATCH_SIZE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("USERDB_DATABASE_PATH") {
            config.database_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup("USERDB_BATCH_SIZE") {
            config.batch_size = match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(CoreError::Config(format!(
                        "USERDB_BATCH_SIZE must be a positive integer, got {:?}",
                        raw
                    )))
                }
            };
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

/// Per-user application data root: `%LOCALAPPDATA%` on Windows,
/// `~/Library/Application Support` on macOS, `$XDG_DATA_HOME` or
/// `~/.local/share` elsewhere.
fn platform_data_dir() -> Option<PathBuf> {
    let env_path = |key: &str| std::env::var_os(key).map(PathBuf::from);

    if cfg!(target_os = "windows") {
        env_path("LOCALAPPDATA")
    } else if cfg!(target_os = "macos") {
        env_path("HOME").map(|home| home.join("Library/Application Support"))
    } else {
        env_path("XDG_DATA_HOME")
            .or_else(|| env_path("HOME").map(|home| home.join(".local/share")))
    }
}
