//! Command handlers. Each returns the process exit code.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

use super::commands::{ConfigArgs, ExecArgs, GoalArgs, HelperArgs, PackageArgs, ProjectsArgs};
use super::output::{OutputFormatter, PackageEntry};
use crate::config::HelperConfig;
use crate::error::BuildError;
use crate::goals::GoalError;
use crate::helper::ProjectHelper;
use crate::process;

impl HelperArgs {
    pub fn to_config(&self) -> Result<HelperConfig> {
        let base_directory = self
            .base_directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let environment: HashMap<String, Option<String>> =
            self.environment.iter().cloned().collect();

        let config = HelperConfig::from_env(
            base_directory,
            Some(environment),
            self.pack_output.clone(),
            self.configuration.clone(),
            self.skip,
        )
        .context("Invalid configuration")?;

        debug!("{}", config);
        Ok(config)
    }
}

fn report_failure(err: &anyhow::Error) -> i32 {
    debug!(error = ?err, "Command failed");
    eprintln!("Error: {:#}", err);
    let build_error = err.downcast_ref::<BuildError>().or_else(|| {
        match err.downcast_ref::<GoalError>() {
            Some(GoalError::Build(e)) => Some(e),
            _ => None,
        }
    });
    if let Some(build_error) = build_error {
        eprintln!("Hint: {}", build_error.help_message());
    }
    1
}

fn finish(result: Result<Option<String>>) -> i32 {
    match result {
        Ok(Some(output)) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            0
        }
        Ok(None) => 0,
        Err(e) => report_failure(&e),
    }
}

pub fn handle_projects(args: &ProjectsArgs) -> i32 {
    finish(run_projects(args).map(Some))
}

fn run_projects(args: &ProjectsArgs) -> Result<String> {
    let helper = ProjectHelper::new(args.helper.to_config()?);
    let projects = helper.find_project_directories(!args.optional)?;
    OutputFormatter::new(args.format.into()).format_projects(&projects)
}

pub fn handle_exec(args: &ExecArgs) -> i32 {
    finish(run_exec(args).map(|_| None))
}

fn run_exec(args: &ExecArgs) -> Result<()> {
    let helper = ProjectHelper::new(args.helper.to_config()?);

    for directory in helper.project_directories()? {
        helper.execute(&directory, args.command.as_slice())?;
    }
    Ok(())
}

pub fn handle_goal(args: &GoalArgs) -> i32 {
    finish(run_goal(args).map(Some))
}

fn run_goal(args: &GoalArgs) -> Result<String> {
    let helper =
        ProjectHelper::new(args.helper.to_config()?).with_toolchain(args.toolchain.clone());
    let report = helper.run_goal(args.goal)?;
    OutputFormatter::new(args.format.into()).format_report(&report)
}

pub fn handle_package(args: &PackageArgs) -> i32 {
    finish(run_package(args).map(Some))
}

fn run_package(args: &PackageArgs) -> Result<String> {
    let helper = ProjectHelper::new(args.helper.to_config()?);

    let mut packages = Vec::new();
    for directory in helper.project_directories()? {
        let package = helper.find_package(&directory)?;
        packages.push(PackageEntry { directory, package });
    }

    OutputFormatter::new(args.format.into()).format_packages(&packages)
}

pub fn handle_probe() -> i32 {
    if process::is_package_manager_available() {
        info!("nuget is available");
        println!("nuget: available");
        0
    } else {
        info!("nuget is not available");
        println!("nuget: not available");
        1
    }
}

pub fn handle_config(args: &ConfigArgs) -> i32 {
    finish(run_config(args).map(Some))
}

fn run_config(args: &ConfigArgs) -> Result<String> {
    let config = args.helper.to_config()?;
    OutputFormatter::new(args.format.into()).format_config(&config)
}
