use dotnet_helper::cli::commands::{CliArgs, Commands};
use dotnet_helper::cli::handlers::{
    handle_config, handle_exec, handle_goal, handle_package, handle_probe, handle_projects,
};
use dotnet_helper::util::logging::{self, init_logging, parse_level, LoggingConfig};
use dotnet_helper::VERSION;

use clap::Parser;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("dotnet-helper v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Projects(projects_args) => handle_projects(projects_args),
        Commands::Exec(exec_args) => handle_exec(exec_args),
        Commands::Goal(goal_args) => handle_goal(goal_args),
        Commands::Package(package_args) => handle_package(package_args),
        Commands::Probe => handle_probe(),
        Commands::Config(config_args) => handle_config(config_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let mut config: LoggingConfig = logging::config_from_env();

    if let Some(level_str) = &args.log_level {
        config.level = parse_level(level_str);
    } else if args.verbose {
        config.level = Level::DEBUG;
    } else if args.quiet {
        config.level = Level::ERROR;
    }

    init_logging(config);
}
