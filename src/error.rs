//! Error types for discovery, packaging and command execution
//!
//! Two error kinds:
//!
//! - [`BuildError`] is the build-failure kind. The embedding tool is expected
//!   to halt and report the message verbatim.
//! - [`PackageNotFound`] signals that the pack step did not produce what it
//!   should have. It is a fail-fast error, not an expected condition.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// An ordered argv rendered as `[program, arg1, arg2]` in error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine(pub Vec<String>);

impl CommandLine {
    pub fn args(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

impl From<&[String]> for CommandLine {
    fn from(args: &[String]) -> Self {
        Self(args.to_vec())
    }
}

/// Failures surfaced to the embedding build tool
#[derive(Debug, Error)]
pub enum BuildError {
    /// No directory with a manifest was found and a match was required
    #[error("Could not find any directories with a 'project.json' file. (in {})", .base_directory.display())]
    NoProjectDirectories { base_directory: PathBuf },

    /// The process could not be started, or waiting on it failed
    #[error("Command (in {}) {command} failed", .directory.display())]
    CommandFailed {
        directory: PathBuf,
        command: CommandLine,
        #[source]
        source: io::Error,
    },

    /// The process ran and reported failure
    #[error("Command (in {}) {command} returned non-zero exit code: {}", .directory.display(), describe_exit(.exit_code, .signal))]
    NonZeroExit {
        directory: PathBuf,
        command: CommandLine,
        exit_code: Option<i32>,
        signal: Option<i32>,
    },
}

fn describe_exit(code: &Option<i32>, signal: &Option<i32>) -> String {
    match (code, signal) {
        (Some(code), Some(signal)) => format!("{} (terminated by signal {})", code, signal),
        (Some(code), None) => code.to_string(),
        (None, Some(signal)) => format!("none (terminated by signal {})", signal),
        (None, None) => "none (terminated by signal)".to_string(),
    }
}

impl BuildError {
    /// Returns a short troubleshooting hint for the error
    pub fn help_message(&self) -> String {
        match self {
            BuildError::NoProjectDirectories { base_directory } => format!(
                "Make sure {} or one of its immediate subdirectories contains a project.json file.",
                base_directory.display()
            ),
            BuildError::CommandFailed { command, .. } => {
                let program = command.args().first().map(String::as_str).unwrap_or("");
                format!(
                    "Check that '{}' is installed and available on PATH.",
                    program
                )
            }
            BuildError::NonZeroExit { .. } => {
                "The tool reported a failure. See its output above for details.".to_string()
            }
        }
    }

    /// Exit code of the child, when the error carries one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            BuildError::NonZeroExit { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}

/// No packaged artifact was found in the resolved output directory
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error(
    "Could not find NuGet package! ModuleDir={}, PackageDir={}, PackOutput={}",
    .module_directory.display(),
    .package_directory.display(),
    .pack_output.display()
)]
pub struct PackageNotFound {
    pub module_directory: PathBuf,
    pub package_directory: PathBuf,
    pub pack_output: PathBuf,
}
