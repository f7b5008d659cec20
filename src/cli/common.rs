//! Shared error and exit-code types for CLI commands.

use std::fmt;

/// Process exit codes used by every subcommand.
///
/// Code 2 belongs to clap, which exits with it on usage errors before any
/// command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Bad input or a failed check
    ValidationError = 1,
    /// Filesystem or serialization failure
    IoError = 3,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands.
#[derive(Debug, Clone)]
pub struct CliError {
    /// Exit code to terminate with
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Error for invalid input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// Error for I/O and serialization failures.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.kind.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result alias for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Pretty-prints a value as JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(CliError::validation("bad").exit_code(), 1);
        assert_eq!(CliError::io("disk").exit_code(), 3);
        assert_eq!(CliError::io("disk").to_string(), "disk");
    }

    #[test]
    fn test_exit_codes_distinct_from_clap_usage() {
        let usage = clap::Error::new(clap::error::ErrorKind::InvalidValue).exit_code();
        assert_eq!(usage, 2);
        assert_ne!(CliError::io("disk").exit_code(), usage);
        assert_ne!(CliError::validation("bad").exit_code(), usage);
    }
}
