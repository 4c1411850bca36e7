//! Configuration discovery and parsing.
//!
//! Parses `ferrite.toml` (or an explicit override path) into a [`Config`].
//! Discovery prefers the working directory before falling back to the
//! platform config dir. Unknown fields are ignored so the file can grow
//! without breaking older binaries; a missing or unparseable file falls
//! back to defaults rather than failing startup.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    /// Maximum retained undo groups; the oldest is evicted on overflow.
    #[serde(default = "HistoryConfig::default_max_depth")]
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::default_max_depth(),
        }
    }
}

impl HistoryConfig {
    const fn default_max_depth() -> usize {
        1000
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FileConfig {
    /// Write a `file~` sibling snapshot before each overwrite.
    #[serde(default = "FileConfig::default_backup")]
    pub backup: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            backup: Self::default_backup(),
        }
    }
}

impl FileConfig {
    const fn default_backup() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub file: FileConfig,
}

/// Best-effort config path: working-directory `ferrite.toml` first, then
/// the platform config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("ferrite.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("ferrite").join("ferrite.toml");
    }
    PathBuf::from("ferrite.toml")
}

/// Load configuration from `path` (or the discovered location). Missing or
/// malformed files yield defaults; startup never fails on configuration.
pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<Config>(&content) {
        Ok(config) => {
            info!(
                target: "config",
                file = %path.display(),
                history_max_depth = config.history.max_depth,
                backup = config.file.backup,
                "config_loaded"
            );
            Ok(config)
        }
        Err(e) => {
            warn!(target: "config", file = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}
