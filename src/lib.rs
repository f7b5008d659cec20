//! NextStep Library
//!
//! This library provides the core of the NextStep career-roadmap browser:
//! the static branch and roadmap tables with fallback resolution, per-session
//! step progress, the persisted dark/light theme preference, and the CLI and
//! terminal UI that present them.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod content;
pub mod context;
pub mod preferences;
pub mod progress;
pub mod tui;
