//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "NEXTSTEP_CONFIG_DIR";

/// Longest accepted theme transition window.
const MAX_TRANSITION_MS: u64 = 60_000;

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Dark backgrounds, light text
    #[default]
    Dark,
    /// Light backgrounds, dark text
    Light,
}

impl ThemeMode {
    /// The other mode.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Stored string value ("dark" or "light").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => anyhow::bail!("Invalid theme mode '{other}'. Must be 'dark' or 'light'"),
        }
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long a theme switch blocks further switches, in milliseconds
    #[serde(default = "default_transition_ms")]
    pub theme_transition_ms: u64,
}

/// Default theme transition window (3 seconds)
fn default_transition_ms() -> u64 {
    3000
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme_transition_ms: default_transition_ms(),
        }
    }
}

impl UiConfig {
    /// Transition window as a [`Duration`].
    #[must_use]
    pub const fn theme_transition(&self) -> Duration {
        Duration::from_millis(self.theme_transition_ms)
    }
}

/// Content source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContentConfig {
    /// Directory holding replacement `roadmaps.json` and `branches.json`.
    /// When unset, the tables built into the binary are used.
    #[serde(default)]
    pub tables_dir: Option<PathBuf>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/NextStep/config.toml`
/// - macOS: `~/Library/Application Support/NextStep/config.toml`
/// - Windows: `%APPDATA%\NextStep\config.toml`
///
/// `NEXTSTEP_CONFIG_DIR` replaces the directory on every platform.
///
/// # Validation
///
/// - `tables_dir` must exist if set
/// - `theme_transition_ms` must not exceed 60 seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
    /// Content sources
    #[serde(default)]
    pub content: ContentConfig,
    /// Device-local string preferences (e.g. `theme = "light"`)
    #[serde(default)]
    pub preferences: BTreeMap<String, String>,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/NextStep/`
    /// - macOS: `~/Library/Application Support/NextStep/`
    /// - Windows: `%APPDATA%\NextStep\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("NextStep");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// String preferences still readable from a config file that fails to
    /// load as a whole, e.g. because a setting no longer validates.
    ///
    /// Returns an empty map if the file is missing or not valid TOML.
    #[must_use]
    pub fn recover_preferences(config_path: &Path) -> BTreeMap<String, String> {
        let Ok(content) = fs::read_to_string(config_path) else {
            return BTreeMap::new();
        };
        let Ok(table) = toml::from_str::<toml::Table>(&content) else {
            return BTreeMap::new();
        };
        table
            .get("preferences")
            .and_then(toml::Value::as_table)
            .map(|prefs| {
                prefs
                    .iter()
                    .filter_map(|(key, value)| Some((key.clone(), value.as_str()?.to_string())))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.content.tables_dir {
            if !dir.is_dir() {
                anyhow::bail!("Content tables directory does not exist: {}", dir.display());
            }
        }

        if self.ui.theme_transition_ms > MAX_TRANSITION_MS {
            anyhow::bail!(
                "Theme transition of {} ms exceeds the {} ms limit",
                self.ui.theme_transition_ms,
                MAX_TRANSITION_MS
            );
        }

        Ok(())
    }
}
