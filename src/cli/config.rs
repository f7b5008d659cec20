//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::content::ContentStore;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::warn;

/// Configuration management commands
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Clone)]
pub struct ConfigSetArgs {
    /// Theme transition window in milliseconds
    #[arg(long, value_name = "MS")]
    transition_ms: Option<u64>,

    /// Directory with replacement roadmaps.json and branches.json
    #[arg(long, value_name = "DIR", conflicts_with = "builtin_tables")]
    tables_dir: Option<PathBuf>,

    /// Go back to the built-in content tables
    #[arg(long)]
    builtin_tables: bool,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    config_file: String,
    ui: UiOutput,
    content: ContentOutput,
    preferences: &'a BTreeMap<String, String>,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    theme_transition_ms: u64,
}

#[derive(Serialize, Debug)]
struct ContentOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    tables_dir: Option<String>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let config_file = Config::config_file_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "(unknown)".to_string());

        if self.json {
            print_json(&ConfigOutput {
                config_file,
                ui: UiOutput {
                    theme_transition_ms: config.ui.theme_transition_ms,
                },
                content: ContentOutput {
                    tables_dir: config
                        .content
                        .tables_dir
                        .as_ref()
                        .map(|p| p.display().to_string()),
                },
                preferences: &config.preferences,
            })
        } else {
            output_human_readable(&config, &config_file);
            Ok(())
        }
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.transition_ms.is_none() && self.tables_dir.is_none() && !self.builtin_tables {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --transition-ms, --tables-dir, or --builtin-tables",
            ));
        }

        // Keep the existing file if it loads; a broken one is replaced,
        // carrying over whatever preferences can still be read
        let mut config = match Config::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Replacing unreadable configuration: {e:#}");
                let mut config = Config::default();
                if let Ok(path) = Config::config_file_path() {
                    config.preferences = Config::recover_preferences(&path);
                }
                config
            }
        };

        if let Some(ms) = self.transition_ms {
            config.ui.theme_transition_ms = ms;
        }

        if let Some(dir) = &self.tables_dir {
            if !dir.is_dir() {
                return Err(CliError::validation(format!(
                    "Content tables directory does not exist: {}",
                    dir.display()
                )));
            }
            // Reject tables that would fail at startup
            ContentStore::load_from_dir(dir)
                .map_err(|e| CliError::validation(format!("{e:#}")))?;
            config.content.tables_dir = Some(dir.clone());
        }

        if self.builtin_tables {
            config.content.tables_dir = None;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(e.to_string()))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config, config_file: &str) {
    println!("NextStep Configuration");
    println!("======================");
    println!("File: {config_file}");
    println!();

    println!("UI:");
    println!(
        "  Theme transition: {} ms",
        config.ui.theme_transition_ms
    );
    println!();

    println!("Content:");
    match &config.content.tables_dir {
        Some(dir) => println!("  Tables: {}", dir.display()),
        None => println!("  Tables: (built-in)"),
    }
    println!();

    println!("Preferences:");
    if config.preferences.is_empty() {
        println!("  (none)");
    }
    for (key, value) in &config.preferences {
        println!("  {key}: {value}");
    }
}
