//! Configuration file support for spirestats.
//!
//! Loads `spirestats.toml` from the working directory, falling back to the
//! user config directory (`~/.config/spirestats/spirestats.toml` on Linux).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use spirestats_runs::DEFAULT_ASCENSION;

/// The config file name
pub const CONFIG_FILE_NAME: &str = "spirestats.toml";

/// Runs directory used when neither the CLI nor a config file names one
pub const DEFAULT_RUNS_DIR: &str = "runs";

/// Settings loaded from `spirestats.toml`
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root of the per-character run directories
    pub runs_dir: Option<PathBuf>,
    /// Ascension level the report is computed at
    pub ascension: Option<u32>,
}

impl Config {
    /// Load configuration, preferring the working directory over the user config dir.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if a file exists and parses successfully
    /// - `Ok(None)` if no file exists
    /// - `Err(...)` if a file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        let local = working_dir.join(CONFIG_FILE_NAME);
        if local.exists() {
            return Self::load_file(&local).map(Some);
        }

        if let Some(user) = dirs::config_dir().map(|d| d.join("spirestats").join(CONFIG_FILE_NAME)) {
            if user.exists() {
                return Self::load_file(&user).map(Some);
            }
        }

        Ok(None)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Priority: CLI flag > config file > `./runs`
    pub fn runs_dir(&self, cli: Option<&Path>) -> PathBuf {
        cli.map(Path::to_path_buf)
            .or_else(|| self.runs_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RUNS_DIR))
    }

    /// Priority: CLI flag > config file > 9
    pub fn ascension(&self, cli: Option<u32>) -> u32 {
        cli.or(self.ascension).unwrap_or(DEFAULT_ASCENSION)
    }
}
