//! CLI command handlers for NextStep.
//!
//! This module provides headless, scriptable access to the content tables,
//! roadmap progress, and theme preference.

pub mod branch;
pub mod branches;
pub mod common;
pub mod config;
pub mod roadmap;
pub mod theme;

// Re-export types used by main.rs and tests
pub use branch::BranchArgs;
pub use branches::BranchesArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use roadmap::RoadmapArgs;
pub use theme::ThemeArgs;
