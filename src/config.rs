//! Configuration management
//!
//! Store location and display settings, kept as TOML in the platform
//! config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Record store settings
    #[serde(default)]
    pub store: StoreConfig,
    /// Console output settings
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the flat file. Relative paths resolve against the working
    /// directory.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("students.txt")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Colour success and error messages
    #[serde(default = "default_true")]
    pub color: bool,
    /// Width of the separator lines around tables
    #[serde(default = "default_separator_width")]
    pub separator_width: usize,
}

fn default_true() -> bool {
    true
}

fn default_separator_width() -> usize {
    30
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_true(),
            separator_width: default_separator_width(),
        }
    }
}

impl DisplayConfig {
    /// Settings for an output stream; colour only reaches a terminal
    pub fn for_output(&self, is_terminal: bool) -> Self {
        Self {
            color: self.color && is_terminal,
            ..self.clone()
        }
    }
}

impl Config {
    /// Load configuration from `path`, writing defaults there if it does not
    /// exist yet
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .context("Failed to read config file")?;
            let config: Config = toml::from_str(&contents)
                .context("Failed to parse config file")?;
            Ok(config)
        } else {
            debug!("No config at {}, writing defaults", path.display());
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create config directory")?;
            }
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "student-records", "student-records")
        .context("Failed to get project directories")?;
    Ok(base.config_dir().join("config.toml"))
}

/// Explicit path if given, otherwise the default location
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => config_path(),
    }
}

/// Show current configuration
pub fn show_config(path: &Path) -> Result<()> {
    let config = Config::load_from(path)?;

    println!("Configuration ({})", path.display());
    println!("  store.path:               {}", config.store.path.display());
    println!("  display.color:            {}", config.display.color);
    println!("  display.separator_width:  {}", config.display.separator_width);

    Ok(())
}

/// Set the store file path
pub fn set_store_path(path: &Path, store_path: &str) -> Result<()> {
    let mut config = Config::load_from(path)?;
    if store_path.trim().is_empty() {
        anyhow::bail!("Store path cannot be empty");
    }
    config.store.path = PathBuf::from(store_path);
    config.save_to(path)?;
    println!("Store path set to {}", store_path);
    Ok(())
}

/// Enable or disable coloured output
pub fn set_color(path: &Path, enabled: bool) -> Result<()> {
    let mut config = Config::load_from(path)?;
    config.display.color = enabled;
    config.save_to(path)?;
    println!("Colour output {}", if enabled { "enabled" } else { "disabled" });
    Ok(())
}

/// Reset configuration to defaults
pub fn reset_config(path: &Path) -> Result<()> {
    let config = Config::default();
    config.save_to(path)?;
    println!("Configuration reset to defaults.");
    Ok(())
}

/// Get default configuration as TOML string
pub fn default_config_toml() -> String {
    let config = Config::default();
    toml::to_string_pretty(&config).unwrap_or_else(|_| "# Default configuration\n".to_string())
}
