//! dotnet toolchain goals
//!
//! Each goal maps to one `dotnet` invocation run in every discovered
//! project directory. `Pack` additionally locates the produced package.

use crate::artifact::resolve_output_directory;
use crate::config::HelperConfig;
use crate::error::{BuildError, PackageNotFound};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub const TOOLCHAIN_PROGRAM: &str = "dotnet";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Restore,
    Build,
    Test,
    Pack,
}

impl Goal {
    pub const ALL: [Goal; 4] = [Goal::Restore, Goal::Build, Goal::Test, Goal::Pack];

    pub fn name(&self) -> &'static str {
        match self {
            Goal::Restore => "restore",
            Goal::Build => "build",
            Goal::Test => "test",
            Goal::Pack => "pack",
        }
    }

    /// argv for running this goal in `module_directory`
    pub fn command(
        &self,
        toolchain: &str,
        config: &HelperConfig,
        module_directory: &Path,
    ) -> Vec<String> {
        let mut argv = vec![toolchain.to_string(), self.name().to_string()];

        match self {
            Goal::Restore => {}
            Goal::Build | Goal::Test => {
                argv.push("-c".to_string());
                argv.push(config.build_configuration().to_string());
            }
            Goal::Pack => {
                let output = resolve_output_directory(config.pack_output(), module_directory);
                argv.push("-c".to_string());
                argv.push(config.build_configuration().to_string());
                argv.push("-o".to_string());
                argv.push(output.display().to_string());
            }
        }

        argv
    }

    pub fn produces_package(&self) -> bool {
        matches!(self, Goal::Pack)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Goal::ALL
            .into_iter()
            .find(|goal| goal.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Invalid goal: {}. Valid options: restore, build, test, pack",
                    s
                )
            })
    }
}

#[derive(Debug, Error)]
pub enum GoalError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    PackageNotFound(#[from] PackageNotFound),
}

/// Outcome of a goal in one project directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectOutcome {
    pub directory: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalReport {
    pub goal: Goal,
    pub skipped: bool,
    pub projects: Vec<ProjectOutcome>,
}
