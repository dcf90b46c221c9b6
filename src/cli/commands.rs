use crate::config::parse_env_entry;
use crate::goals::Goal;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Finds project.json projects and drives dotnet/nuget tooling over them
#[derive(Parser, Debug)]
#[command(
    name = "dotnet-helper",
    about = "Finds project.json projects and drives dotnet/nuget tooling over them",
    version,
    author,
    long_about = "dotnet-helper locates directories containing a project.json file, runs \
                  dotnet commands in each of them with a controlled environment, and \
                  locates the NuGet packages produced by `dotnet pack`."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "List project directories",
        long_about = "Lists the base directory if it contains project.json, otherwise every \
                      immediate subdirectory that does.\n\n\
                      Examples:\n  \
                      dotnet-helper projects\n  \
                      dotnet-helper projects src --format json"
    )]
    Projects(ProjectsArgs),

    #[command(
        about = "Run a command in every project directory",
        long_about = "Runs the given command in every project directory with the configured \
                      environment overlay, stopping at the first failure.\n\n\
                      Examples:\n  \
                      dotnet-helper exec -- dotnet restore\n  \
                      dotnet-helper exec -e NUGET_PACKAGES=/cache -- dotnet build"
    )]
    Exec(ExecArgs),

    #[command(
        about = "Run a dotnet goal in every project directory",
        long_about = "Runs `dotnet restore`, `dotnet build`, `dotnet test` or `dotnet pack` in \
                      every project directory. `pack` also reports the produced package.\n\n\
                      Examples:\n  \
                      dotnet-helper goal build -c Debug\n  \
                      dotnet-helper goal pack --pack-output /tmp/packages"
    )]
    Goal(GoalArgs),

    #[command(about = "Print the NuGet package of every project directory")]
    Package(PackageArgs),

    #[command(about = "Check whether the nuget executable is available")]
    Probe,

    #[command(
        about = "Show the effective configuration",
        long_about = "Prints the configuration after applying defaults, DOTNET_HELPER_* \
                      environment variables and command-line flags.\n\n\
                      Examples:\n  \
                      dotnet-helper config\n  \
                      dotnet-helper config -c Debug --format json"
    )]
    Config(ConfigArgs),
}

/// Settings shared by every command that works on project directories
#[derive(Args, Debug, Clone)]
pub struct HelperArgs {
    #[arg(
        value_name = "PATH",
        help = "Base directory to search (defaults to current directory)"
    )]
    pub base_directory: Option<PathBuf>,

    #[arg(
        short = 'e',
        long = "env",
        value_name = "KEY=VALUE",
        value_parser = parse_env_arg,
        help = "Environment variable for child processes (repeatable)"
    )]
    pub environment: Vec<(String, Option<String>)>,

    #[arg(
        long,
        value_name = "DIR",
        help = "Package output directory, absolute or relative to each project [default: bin]"
    )]
    pub pack_output: Option<PathBuf>,

    #[arg(
        short = 'c',
        long,
        value_name = "NAME",
        help = "Build configuration [default: Release]"
    )]
    pub configuration: Option<String>,

    #[arg(long, help = "Skip project discovery entirely")]
    pub skip: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ProjectsArgs {
    #[command(flatten)]
    pub helper: HelperArgs,

    #[arg(long, help = "Succeed with an empty list when nothing is found")]
    pub optional: bool,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,
}

#[derive(Args, Debug, Clone)]
pub struct ExecArgs {
    #[command(flatten)]
    pub helper: HelperArgs,

    #[arg(
        last = true,
        required = true,
        value_name = "COMMAND",
        help = "Program and arguments to run"
    )]
    pub command: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct GoalArgs {
    #[arg(value_parser = parse_goal, value_name = "GOAL", help = "restore, build, test or pack")]
    pub goal: Goal,

    #[command(flatten)]
    pub helper: HelperArgs,

    #[arg(
        long,
        value_name = "PROGRAM",
        default_value = "dotnet",
        help = "dotnet executable to invoke"
    )]
    pub toolchain: String,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,
}

#[derive(Args, Debug, Clone)]
pub struct PackageArgs {
    #[command(flatten)]
    pub helper: HelperArgs,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub helper: HelperArgs,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

fn parse_env_arg(s: &str) -> Result<(String, Option<String>), String> {
    parse_env_entry(s).map_err(|e| e.to_string())
}

fn parse_goal(s: &str) -> Result<Goal, String> {
    s.parse()
}
