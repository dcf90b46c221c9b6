//! `ProjectHelper` ties configuration, discovery, package lookup and command
//! execution together for an embedding build tool.
//!
//! # Example
//!
//! ```no_run
//! use dotnet_helper::{Goal, HelperConfig, ProjectHelper};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HelperConfig::new("/path/to/solution", None, None, None, false);
//! let helper = ProjectHelper::new(config);
//!
//! for dir in helper.project_directories()? {
//!     helper.execute(&dir, &["dotnet", "restore"])?;
//! }
//!
//! let report = helper.run_goal(Goal::Pack)?;
//! for project in report.projects {
//!     println!("{:?}", project.package);
//! }
//! # Ok(())
//! # }
//! ```

use crate::artifact;
use crate::config::HelperConfig;
use crate::discovery;
use crate::error::{BuildError, PackageNotFound};
use crate::fs::{FileSystem, RealFileSystem};
use crate::goals::{Goal, GoalError, GoalReport, ProjectOutcome, TOOLCHAIN_PROGRAM};
use crate::process;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct ProjectHelper<F: FileSystem = RealFileSystem> {
    config: HelperConfig,
    fs: F,
    toolchain: String,
}

impl ProjectHelper<RealFileSystem> {
    pub fn new(config: HelperConfig) -> Self {
        Self::with_fs(config, RealFileSystem::new())
    }
}

impl<F: FileSystem> ProjectHelper<F> {
    pub fn with_fs(config: HelperConfig, fs: F) -> Self {
        Self {
            config,
            fs,
            toolchain: TOOLCHAIN_PROGRAM.to_string(),
        }
    }

    /// Replaces the `dotnet` executable used by [`ProjectHelper::run_goal`].
    pub fn with_toolchain(mut self, toolchain: impl Into<String>) -> Self {
        self.toolchain = toolchain.into();
        self
    }

    pub fn config(&self) -> &HelperConfig {
        &self.config
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    pub fn toolchain(&self) -> &str {
        &self.toolchain
    }

    pub fn is_skip(&self) -> bool {
        self.config.is_skip()
    }

    pub fn build_configuration(&self) -> &str {
        self.config.build_configuration()
    }

    /// Project directories, failing when there are none.
    pub fn project_directories(&self) -> Result<Vec<PathBuf>, BuildError> {
        self.find_project_directories(true)
    }

    pub fn find_project_directories(
        &self,
        require_match: bool,
    ) -> Result<Vec<PathBuf>, BuildError> {
        discovery::find_project_directories(
            &self.fs,
            self.config.base_directory(),
            self.config.is_skip(),
            require_match,
        )
    }

    pub fn package_directory(&self, module_directory: &Path) -> PathBuf {
        artifact::resolve_output_directory(self.config.pack_output(), module_directory)
    }

    pub fn find_package(&self, module_directory: &Path) -> Result<PathBuf, PackageNotFound> {
        artifact::find_packaged_artifact(&self.fs, self.config.pack_output(), module_directory)
    }

    pub fn execute<S: AsRef<str>>(
        &self,
        working_directory: &Path,
        argv: &[S],
    ) -> Result<(), BuildError> {
        process::execute(working_directory, argv, self.config.environment())
    }

    pub fn execute_line(&self, working_directory: &Path, command: &str) -> Result<(), BuildError> {
        process::execute_line(working_directory, command, self.config.environment())
    }

    pub fn is_nuget_available(&self) -> bool {
        process::is_package_manager_available()
    }

    /// Runs `goal` in every project directory, stopping at the first failure.
    ///
    /// With the skip flag set nothing runs and the report is marked skipped.
    pub fn run_goal(&self, goal: Goal) -> Result<GoalReport, GoalError> {
        if self.is_skip() {
            info!("Skipping dotnet {}", goal);
            return Ok(GoalReport {
                goal,
                skipped: true,
                projects: Vec::new(),
            });
        }

        let mut projects = Vec::new();
        for directory in self.project_directories()? {
            let argv = goal.command(&self.toolchain, &self.config, &directory);
            self.execute(&directory, argv.as_slice())?;

            let package = if goal.produces_package() {
                Some(self.find_package(&directory)?)
            } else {
                None
            };

            projects.push(ProjectOutcome { directory, package });
        }

        info!(count = projects.len(), "dotnet {} finished", goal);
        Ok(GoalReport {
            goal,
            skipped: false,
            projects,
        })
    }
}
