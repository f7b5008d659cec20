//! Theme preference commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::preferences::{ThemeStore, ToggleOutcome};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Show or switch the dark/light theme
#[derive(Debug, Clone, Args)]
pub struct ThemeArgs {
    #[command(subcommand)]
    command: ThemeCommand,
}

#[derive(Debug, Clone, Subcommand)]
enum ThemeCommand {
    /// Print the current theme
    Show(ThemeOutputArgs),
    /// Switch between dark and light
    Toggle(ThemeOutputArgs),
}

#[derive(Debug, Clone, Args)]
struct ThemeOutputArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct ThemeOutput {
    theme: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    persisted: Option<bool>,
}

impl ThemeArgs {
    /// Execute the theme subcommand
    pub fn execute(&self, theme: &mut ThemeStore) -> CliResult<()> {
        match &self.command {
            ThemeCommand::Show(args) => {
                let output = ThemeOutput {
                    theme: theme.mode().as_str(),
                    persisted: None,
                };
                if args.json {
                    print_json(&output)
                } else {
                    println!("Theme: {}", output.theme);
                    Ok(())
                }
            }
            ThemeCommand::Toggle(args) => match theme.toggle() {
                ToggleOutcome::Applied { mode, persisted } => {
                    if args.json {
                        return print_json(&ThemeOutput {
                            theme: mode.as_str(),
                            persisted: Some(persisted),
                        });
                    }
                    println!("Theme: {mode}");
                    if !persisted {
                        eprintln!("Warning: theme could not be saved and applies to this run only");
                    }
                    Ok(())
                }
                ToggleOutcome::Busy => Err(CliError::validation(
                    "Theme switch already in progress",
                )),
            },
        }
    }
}
