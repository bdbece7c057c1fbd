//! Configuration file handling.
//!
//! This module provides loading and saving of nbe2ivil configuration
//! from a TOML file.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/nbe2ivil/config.toml`
//! - macOS: `~/Library/Application Support/nbe2ivil/config.toml`
//! - Windows: `%APPDATA%\nbe2ivil\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! pretty = true
//! default_scanner_version = "4.2"
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application configuration.
///
/// Everything here is a soft default; command-line flags always win.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Indent the emitted XML for human readers.
    ///
    /// Default: true
    pub pretty: bool,

    /// Scanner version recorded in the sender block when no
    /// `--scannerversion` flag is provided.
    ///
    /// Default: none (the version attribute is omitted)
    pub default_scanner_version: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pretty: true,
            default_scanner_version: None,
        }
    }
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to the config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nbe2ivil")
            .join("config.toml")
    }
}
