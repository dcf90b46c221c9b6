pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{
    CliArgs, Commands, ConfigArgs, ExecArgs, GoalArgs, HelperArgs, PackageArgs, ProjectsArgs,
};
pub use output::{OutputFormat, OutputFormatter};
