//! Application context built once at startup.
//!
//! Everything the presentation layer needs (content tables, theme store,
//! configuration) is owned here and passed down explicitly.

use anyhow::Result;
use std::path::Path;
use tracing::warn;

use crate::config::Config;
use crate::content::ContentStore;
use crate::preferences::{ConfigPreferences, PreferenceStore, ThemeStore};

/// Shared state handed to the CLI and TUI.
#[derive(Debug)]
pub struct AppContext {
    /// Loaded configuration
    pub config: Config,
    /// Content tables
    pub content: ContentStore,
    /// Theme preference
    pub theme: ThemeStore,
}

impl AppContext {
    /// Assembles a context from already-built parts.
    pub fn new(config: Config, content: ContentStore, preferences: Box<dyn PreferenceStore>) -> Self {
        let theme = ThemeStore::load(preferences, config.ui.theme_transition());
        Self {
            config,
            content,
            theme,
        }
    }

    /// Loads config, content and preferences from their default locations.
    pub fn from_environment() -> Result<Self> {
        Self::from_config_file(&Config::config_file_path()?)
    }

    /// Loads config and preferences from `config_path`.
    ///
    /// A config file that fails to load is ignored for this run and left
    /// as it is on disk; the theme then reads as dark.
    pub fn from_config_file(config_path: &Path) -> Result<Self> {
        let config = Config::load_from(config_path).unwrap_or_else(|e| {
            warn!("Ignoring unreadable configuration, using defaults: {e:#}");
            Config::default()
        });
        let content = load_content(&config)?;
        let preferences = ConfigPreferences::new(config_path.to_path_buf());
        Ok(Self::new(config, content, Box::new(preferences)))
    }
}

/// Content tables named by the config, or the built-in ones.
pub fn load_content(config: &Config) -> Result<ContentStore> {
    match &config.content.tables_dir {
        Some(dir) => ContentStore::load_from_dir(dir),
        None => ContentStore::load(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeMode;
    use crate::preferences::{MemoryPreferences, ToggleOutcome, THEME_KEY};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_context_reads_theme_from_backend() {
        let ctx = AppContext::new(
            Config::new(),
            ContentStore::load().unwrap(),
            Box::new(MemoryPreferences::with_value(THEME_KEY, "light")),
        );
        assert_eq!(ctx.theme.mode(), ThemeMode::Light);
        assert_eq!(ctx.theme.transition().as_millis(), 3000);
    }

    #[test]
    fn test_load_content_from_tables_dir() {
        let temp_dir = TempDir::new().unwrap();
        let roadmaps = include_str!("content/roadmaps.json")
            .replace("Tech Professional", "Generalist");
        fs::write(temp_dir.path().join("roadmaps.json"), roadmaps).unwrap();
        fs::write(
            temp_dir.path().join("branches.json"),
            include_str!("content/branches.json"),
        )
        .unwrap();

        let mut config = Config::new();
        config.content.tables_dir = Some(temp_dir.path().to_path_buf());

        let content = load_content(&config).unwrap();
        assert_eq!(content.resolve_roadmap(None).role, "Generalist");
    }

    #[test]
    fn test_context_survives_corrupt_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[preferences\n").unwrap();

        let mut ctx = AppContext::from_config_file(&config_file).unwrap();
        assert_eq!(ctx.config, Config::default());
        assert_eq!(ctx.theme.mode(), ThemeMode::Dark);

        // Switching still works for the session, the file stays as it was
        assert_eq!(
            ctx.theme.toggle(),
            ToggleOutcome::Applied {
                mode: ThemeMode::Light,
                persisted: false
            }
        );
        assert_eq!(fs::read_to_string(&config_file).unwrap(), "[preferences\n");
    }

    #[test]
    fn test_context_reads_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(
            &config_file,
            "[ui]\ntheme_transition_ms = 250\n\n[preferences]\ntheme = \"light\"\n",
        )
        .unwrap();

        let ctx = AppContext::from_config_file(&config_file).unwrap();
        assert_eq!(ctx.config.ui.theme_transition_ms, 250);
        assert_eq!(ctx.theme.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_load_content_missing_files_errors() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::new();
        config.content.tables_dir = Some(temp_dir.path().to_path_buf());
        assert!(load_content(&config).is_err());
    }
}
