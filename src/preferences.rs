//! Device-local preferences and the dark/light theme store.
//!
//! The theme preference is a single string persisted through a
//! [`PreferenceStore`]. Switching themes opens a transition window during
//! which further switches are rejected rather than queued.

use anyhow::Result;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::{Config, ThemeMode};

/// Preference key holding the theme mode.
pub const THEME_KEY: &str = "theme";

/// Key-value persistence for string preferences.
pub trait PreferenceStore {
    /// Reads a value; `Ok(None)` if the key was never written.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value, replacing any previous one.
    fn store(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preferences kept in the `[preferences]` table of a config file.
#[derive(Debug, Clone)]
pub struct ConfigPreferences {
    path: PathBuf,
}

impl ConfigPreferences {
    /// Uses the config file at `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl PreferenceStore for ConfigPreferences {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let config = Config::load_from(&self.path)?;
        Ok(config.preferences.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<()> {
        // A config that fails to load is left untouched rather than overwritten
        let mut config = Config::load_from(&self.path)?;
        config
            .preferences
            .insert(key.to_string(), value.to_string());
        config.save_to(&self.path)
    }
}

/// In-memory preferences, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value.
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.to_string());
        Self { values }
    }

    /// Current value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Result of a theme toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The mode was switched
    Applied {
        /// Mode now in effect
        mode: ThemeMode,
        /// False if writing the preference failed; the mode still applies
        persisted: bool,
    },
    /// A previous switch is still transitioning; nothing changed
    Busy,
}

/// Process-wide dark/light preference with a transition lock.
pub struct ThemeStore {
    backend: Box<dyn PreferenceStore>,
    mode: ThemeMode,
    transition: Duration,
    /// End of the current transition window, if one is open
    busy_until: Option<Instant>,
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("mode", &self.mode)
            .field("transition", &self.transition)
            .field("busy_until", &self.busy_until)
            .finish_non_exhaustive()
    }
}

impl ThemeStore {
    /// Builds the store, reading the persisted preference once.
    pub fn load(backend: Box<dyn PreferenceStore>, transition: Duration) -> Self {
        let mode = Self::load_preference(backend.as_ref());
        debug!(%mode, "Theme preference loaded");
        Self {
            backend,
            mode,
            transition,
            busy_until: None,
        }
    }

    /// Reads the persisted theme. Absent, unreadable, or unrecognised
    /// values yield [`ThemeMode::Dark`].
    pub fn load_preference(backend: &dyn PreferenceStore) -> ThemeMode {
        match backend.load(THEME_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|_| {
                warn!(value = %value, "Unrecognised theme preference, using dark");
                ThemeMode::Dark
            }),
            Ok(None) => ThemeMode::Dark,
            Err(e) => {
                warn!("Failed to read theme preference: {e:#}");
                ThemeMode::Dark
            }
        }
    }

    /// Mode currently in effect.
    #[must_use]
    pub const fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Length of the transition window.
    #[must_use]
    pub const fn transition(&self) -> Duration {
        self.transition
    }

    /// Switches dark and light, persisting the new mode.
    pub fn toggle(&mut self) -> ToggleOutcome {
        self.toggle_at(Instant::now())
    }

    /// [`Self::toggle`] with an explicit clock reading.
    pub fn toggle_at(&mut self, now: Instant) -> ToggleOutcome {
        if self.is_transitioning_at(now) {
            debug!("Theme toggle rejected, transition in progress");
            return ToggleOutcome::Busy;
        }

        self.mode = self.mode.flipped();
        self.busy_until = Some(now + self.transition);

        let persisted = match self.backend.store(THEME_KEY, self.mode.as_str()) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to persist theme preference: {e:#}");
                false
            }
        };

        info!(mode = %self.mode, persisted, "Theme switched");
        ToggleOutcome::Applied {
            mode: self.mode,
            persisted,
        }
    }

    /// Closes the transition window early, once the visual switch is done.
    pub fn finish_transition(&mut self) {
        self.busy_until = None;
    }

    /// Returns true while a switch is still transitioning.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning_at(Instant::now())
    }

    /// [`Self::is_transitioning`] with an explicit clock reading.
    #[must_use]
    pub fn is_transitioning_at(&self, now: Instant) -> bool {
        self.busy_until.is_some_and(|until| now < until)
    }
}
