//! External command execution
//!
//! Commands run synchronously with the caller's stdin/stdout/stderr attached
//! directly to the child. The child is always waited on before returning, so
//! no process is left behind on any exit path. There is no timeout and no
//! retry: a hung tool blocks the caller.

use crate::error::{BuildError, CommandLine};
use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, info};

pub const PACKAGE_MANAGER_PROGRAM: &str = "nuget";
pub const PACKAGE_MANAGER_PROBE_ARG: &str = "help";

/// Splits a command on single spaces.
///
/// Arguments that themselves contain spaces cannot be expressed this way; use
/// [`execute`] with an explicit argv for those. Repeated or leading spaces
/// yield empty arguments; trailing empty segments are dropped.
pub fn split_command_line(command: &str) -> Vec<String> {
    let mut argv: Vec<String> = command.split(' ').map(str::to_string).collect();
    while argv.last().is_some_and(|part| part.is_empty()) {
        argv.pop();
    }
    argv
}

/// Runs `argv` in `working_directory` with `environment` overlaid on the
/// inherited environment, and waits for it to finish.
///
/// Only exit code 0 counts as success.
pub fn execute<S: AsRef<str>>(
    working_directory: &Path,
    argv: &[S],
    environment: &BTreeMap<String, String>,
) -> Result<(), BuildError> {
    let argv: Vec<String> = argv.iter().map(|a| a.as_ref().to_string()).collect();
    let (program, args) = argv.split_first().ok_or_else(|| BuildError::CommandFailed {
        directory: working_directory.to_path_buf(),
        command: CommandLine(Vec::new()),
        source: io::Error::new(io::ErrorKind::InvalidInput, "empty command"),
    })?;

    let mut command = Command::new(program);
    command
        .args(args)
        .current_dir(working_directory)
        .envs(environment)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let command_line = CommandLine(argv.clone());
    info!("Running {} in {}", command_line, working_directory.display());
    debug!(
        overlay = ?environment.keys().collect::<Vec<_>>(),
        "Environment overlay"
    );

    // status() spawns and waits, so the child is reaped before we return
    let status = command.status().map_err(|source| BuildError::CommandFailed {
        directory: working_directory.to_path_buf(),
        command: command_line.clone(),
        source,
    })?;

    if status.success() {
        debug!("{} finished successfully", command_line);
        return Ok(());
    }

    let signal = terminating_signal(&status);
    Err(BuildError::NonZeroExit {
        directory: working_directory.to_path_buf(),
        command: command_line,
        exit_code: status.code().or_else(|| signal.map(|s| 128 + s)),
        signal,
    })
}

/// Signal that killed the child, if any. Shells report these as 128 + signal.
#[cfg(unix)]
fn terminating_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

/// Same as [`execute`], splitting `command` with [`split_command_line`] first.
pub fn execute_line(
    working_directory: &Path,
    command: &str,
    environment: &BTreeMap<String, String>,
) -> Result<(), BuildError> {
    let argv = split_command_line(command);
    execute(working_directory, argv.as_slice(), environment)
}

/// Best-effort check that `program args…` starts and exits with code 0.
///
/// This is the one place where command errors are discarded: any failure
/// to start, failure while waiting, or non-zero exit yields `false`. The
/// child's streams are detached so its output never reaches the caller.
pub fn is_program_available(program: &str, args: &[&str]) -> bool {
    match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) => {
            debug!(program, code = ?status.code(), "Availability probe finished");
            status.success()
        }
        Err(e) => {
            debug!(program, error = %e, "Availability probe could not run");
            false
        }
    }
}

/// Whether the `nuget` executable can be invoked on this system.
pub fn is_package_manager_available() -> bool {
    is_program_available(PACKAGE_MANAGER_PROGRAM, &[PACKAGE_MANAGER_PROBE_ARG])
}
