//! dotnet-helper - project.json discovery and dotnet/nuget command execution
//!
//! This library backs a build-tool plugin for `project.json`-based .NET
//! projects. It finds project directories, runs toolchain commands in them
//! with a controlled environment and inherited standard streams, and locates
//! the NuGet packages `dotnet pack` produces.
//!
//! # Core Concepts
//!
//! - **Project directory**: a directory with a `project.json` file as an
//!   immediate child
//! - **Pack output**: where `.nupkg` files land, absolute or relative to each
//!   project directory (default `bin`)
//! - **Skip flag**: turns every discovery into a no-op returning nothing
//!
//! # Example
//!
//! ```no_run
//! use dotnet_helper::{HelperConfig, ProjectHelper};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let helper = ProjectHelper::new(HelperConfig::new(".", None, None, None, false));
//! for dir in helper.project_directories()? {
//!     helper.execute_line(&dir, "dotnet build -c Release")?;
//!     println!("{}", helper.find_package(&dir)?.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod fs;
pub mod goals;
pub mod helper;
pub mod process;
pub mod util;

pub use config::{ConfigError, HelperConfig};
pub use error::{BuildError, CommandLine, PackageNotFound};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use goals::{Goal, GoalError, GoalReport, ProjectOutcome};
pub use helper::ProjectHelper;
pub use util::{init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_dotnet_helper() {
        assert_eq!(NAME, "dotnet-helper");
    }
}
