//! Output formatting for CLI results
//!
//! Results go to stdout in either human-readable text or JSON. Logs and
//! errors never go through here; they are written to stderr.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::HelperConfig;
use crate::goals::GoalReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// One line per item
    Human,
}

#[derive(Debug, Serialize)]
struct ProjectList<'a> {
    projects: &'a [PathBuf],
}

#[derive(Debug, Serialize)]
pub struct PackageEntry {
    pub directory: PathBuf,
    pub package: PathBuf,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_projects(&self, projects: &[PathBuf]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(&ProjectList { projects }),
            OutputFormat::Human => Ok(projects
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    pub fn format_packages(&self, packages: &[PackageEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(&packages),
            OutputFormat::Human => Ok(packages
                .iter()
                .map(|entry| {
                    format!(
                        "{}: {}",
                        entry.directory.display(),
                        entry.package.display()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    pub fn format_config(&self, config: &HelperConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let config_map = config.to_display_map();
                serde_json::to_string_pretty(&config_map)
                    .context("Failed to serialize config to JSON")
            }
            OutputFormat::Human => Ok(config.to_string().trim_end().to_string()),
        }
    }

    pub fn format_report(&self, report: &GoalReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(report),
            OutputFormat::Human => {
                if report.skipped {
                    return Ok(format!("dotnet {}: skipped", report.goal));
                }

                let mut lines = vec![format!(
                    "dotnet {}: {} project(s)",
                    report.goal,
                    report.projects.len()
                )];
                for project in &report.projects {
                    match &project.package {
                        Some(package) => lines.push(format!(
                            "  {} -> {}",
                            project.directory.display(),
                            package.display()
                        )),
                        None => lines.push(format!("  {}", project.directory.display())),
                    }
                }
                Ok(lines.join("\n"))
            }
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output to JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::{Goal, ProjectOutcome};

    #[test]
    fn test_format_config() {
        let config = HelperConfig::new("/w", None, None, Some("Debug".to_string()), false);

        let json = OutputFormatter::new(OutputFormat::Json)
            .format_config(&config)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["build_configuration"], "Debug");
        assert_eq!(value["pack_output"], "bin");

        let human = OutputFormatter::new(OutputFormat::Human)
            .format_config(&config)
            .unwrap();
        assert!(human.contains("Build Configuration: Debug"));
    }

    #[test]
    fn test_format_projects_human() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let out = formatter
            .format_projects(&[PathBuf::from("/w/Foo"), PathBuf::from("/w/Bar")])
            .unwrap();
        assert_eq!(out, "/w/Foo\n/w/Bar");
    }

    #[test]
    fn test_format_projects_json() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let out = formatter.format_projects(&[PathBuf::from("/w/Foo")]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["projects"][0], "/w/Foo");
    }

    #[test]
    fn test_format_packages() {
        let packages = vec![PackageEntry {
            directory: PathBuf::from("/w/Foo"),
            package: PathBuf::from("/w/Foo/bin/Foo.1.0.0.nupkg"),
        }];

        let human = OutputFormatter::new(OutputFormat::Human)
            .format_packages(&packages)
            .unwrap();
        assert_eq!(human, "/w/Foo: /w/Foo/bin/Foo.1.0.0.nupkg");

        let json = OutputFormatter::new(OutputFormat::Json)
            .format_packages(&packages)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["package"], "/w/Foo/bin/Foo.1.0.0.nupkg");
    }

    #[test]
    fn test_format_report_human() {
        let report = GoalReport {
            goal: Goal::Pack,
            skipped: false,
            projects: vec![ProjectOutcome {
                directory: PathBuf::from("/w/Foo"),
                package: Some(PathBuf::from("/w/Foo/bin/Foo.nupkg")),
            }],
        };

        let out = OutputFormatter::new(OutputFormat::Human)
            .format_report(&report)
            .unwrap();
        assert!(out.starts_with("dotnet pack: 1 project(s)"));
        assert!(out.contains("/w/Foo -> /w/Foo/bin/Foo.nupkg"));
    }

    #[test]
    fn test_format_report_skipped() {
        let report = GoalReport {
            goal: Goal::Build,
            skipped: true,
            projects: Vec::new(),
        };

        let out = OutputFormatter::new(OutputFormat::Human)
            .format_report(&report)
            .unwrap();
        assert_eq!(out, "dotnet build: skipped");
    }
}
