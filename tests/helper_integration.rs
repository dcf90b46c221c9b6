//! ProjectHelper integration tests against a real filesystem
//!
//! Covers:
//! - project directory discovery and the skip flag
//! - pack output resolution and package lookup
//! - command execution, exit codes and the environment overlay
//! - goals driven through a stand-in toolchain

use dotnet_helper::{BuildError, Goal, GoalError, HelperConfig, ProjectHelper};
use serial_test::serial;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn add_project(base: &Path, name: &str) -> PathBuf {
    let dir = base.join(name);
    fs::create_dir_all(&dir).expect("Failed to create project directory");
    fs::write(dir.join("project.json"), "{ \"version\": \"1.0.0-*\" }")
        .expect("Failed to write project.json");
    dir
}

fn helper_for(base: &Path) -> ProjectHelper {
    ProjectHelper::new(HelperConfig::new(base, None, None, None, false))
}

fn sorted(mut dirs: Vec<PathBuf>) -> Vec<PathBuf> {
    dirs.sort();
    dirs
}

#[test]
fn test_two_qualifying_subdirectories() {
    let temp = TempDir::new().unwrap();
    let foo = add_project(temp.path(), "Foo");
    let bar = add_project(temp.path(), "Bar");
    fs::create_dir(temp.path().join("docs")).unwrap();
    fs::write(temp.path().join("global.json"), "{}").unwrap();

    let dirs = helper_for(temp.path()).project_directories().unwrap();

    assert_eq!(sorted(dirs), sorted(vec![foo, bar]));
}

#[test]
fn test_base_directory_is_project() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("project.json"), "{}").unwrap();
    add_project(temp.path(), "Nested");

    let dirs = helper_for(temp.path()).project_directories().unwrap();

    assert_eq!(dirs, vec![temp.path().to_path_buf()]);
}

#[test]
fn test_manifest_must_be_a_direct_child() {
    let temp = TempDir::new().unwrap();
    add_project(&temp.path().join("src"), "Foo");

    let helper = helper_for(temp.path());

    assert!(matches!(
        helper.project_directories(),
        Err(BuildError::NoProjectDirectories { .. })
    ));
    assert!(helper.find_project_directories(false).unwrap().is_empty());
}

#[test]
fn test_skip_ignores_filesystem() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("project.json"), "{}").unwrap();

    let config = HelperConfig::new(temp.path(), None, None, None, true);
    let helper = ProjectHelper::new(config);

    assert!(helper.is_skip());
    assert!(helper.project_directories().unwrap().is_empty());
}

#[test]
fn test_nonexistent_base_directory() {
    let helper = helper_for(Path::new("/nonexistent/dotnet-helper/base"));

    assert!(helper.project_directories().is_err());
    assert!(helper.find_project_directories(false).unwrap().is_empty());
}

#[test]
fn test_find_package_relative_output() {
    let temp = TempDir::new().unwrap();
    let foo = add_project(temp.path(), "Foo");
    fs::create_dir(foo.join("bin")).unwrap();
    fs::write(foo.join("bin/a.txt"), "").unwrap();
    fs::write(foo.join("bin/b.nupkg"), "").unwrap();

    let package = helper_for(temp.path()).find_package(&foo).unwrap();

    assert_eq!(package, foo.join("bin/b.nupkg"));
}

#[test]
fn test_find_package_absolute_output() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("packages");
    fs::create_dir(&out).unwrap();
    fs::write(out.join("Foo.1.0.0.nupkg"), "").unwrap();

    let config = HelperConfig::new(temp.path(), None, Some(out.clone()), None, false);
    let helper = ProjectHelper::new(config);

    assert_eq!(helper.package_directory(Path::new("/any/module")), out);
    assert_eq!(
        helper.find_package(Path::new("/any/module")).unwrap(),
        out.join("Foo.1.0.0.nupkg")
    );
}

#[test]
fn test_find_package_missing() {
    let temp = TempDir::new().unwrap();
    let foo = add_project(temp.path(), "Foo");
    fs::create_dir(foo.join("bin")).unwrap();
    fs::write(foo.join("bin/a.txt"), "").unwrap();

    let err = helper_for(temp.path()).find_package(&foo).unwrap_err();
    let msg = err.to_string();

    assert!(msg.contains(&format!("ModuleDir={}", foo.display())));
    assert!(msg.contains(&format!("PackageDir={}", foo.join("bin").display())));
    assert!(msg.contains("PackOutput=bin"));
}

#[test]
fn test_execute_missing_program() {
    let temp = TempDir::new().unwrap();

    let err = helper_for(temp.path())
        .execute(temp.path(), &["dotnet-helper-missing-tool"])
        .unwrap_err();

    assert!(matches!(err, BuildError::CommandFailed { .. }));
}

#[test]
#[cfg(unix)]
fn test_execute_exit_codes() {
    let temp = TempDir::new().unwrap();
    let helper = helper_for(temp.path());

    helper.execute(temp.path(), &["sh", "-c", "exit 0"]).unwrap();

    let err = helper
        .execute(temp.path(), &["sh", "-c", "exit 1"])
        .unwrap_err();
    assert_eq!(err.exit_code(), Some(1));
    assert!(err.to_string().contains("exit code: 1"));
    assert!(err.to_string().contains("[sh, -c, exit 1]"));
}

#[test]
#[cfg(unix)]
#[serial]
fn test_environment_overlay_overrides_inherited() {
    let temp = TempDir::new().unwrap();
    std::env::set_var("DOTNET_HELPER_IT_VALUE", "inherited");

    let mut environment = HashMap::new();
    environment.insert("DOTNET_HELPER_IT_VALUE".to_string(), Some("X".to_string()));
    environment.insert("DOTNET_HELPER_IT_NULL".to_string(), None);
    let helper = ProjectHelper::new(HelperConfig::new(
        temp.path(),
        Some(environment),
        None,
        None,
        false,
    ));

    let result = helper.execute(
        temp.path(),
        &[
            "sh",
            "-c",
            "test \"$DOTNET_HELPER_IT_VALUE\" = X && test \"${DOTNET_HELPER_IT_NULL+set}\" = set && test -z \"$DOTNET_HELPER_IT_NULL\"",
        ],
    );
    std::env::remove_var("DOTNET_HELPER_IT_VALUE");

    result.unwrap();
}

#[test]
#[cfg(unix)]
#[serial]
fn test_inherited_environment_passes_through() {
    let temp = TempDir::new().unwrap();
    std::env::set_var("DOTNET_HELPER_IT_INHERITED", "yes");

    let check = helper_for(temp.path()).execute(
        temp.path(),
        &["sh", "-c", "test \"$DOTNET_HELPER_IT_INHERITED\" = yes"],
    );
    std::env::remove_var("DOTNET_HELPER_IT_INHERITED");

    check.unwrap();
}

#[test]
#[cfg(unix)]
fn test_goal_runs_in_each_project() {
    let temp = TempDir::new().unwrap();
    let foo = add_project(temp.path(), "Foo");
    let bar = add_project(temp.path(), "Bar");

    let report = helper_for(temp.path())
        .with_toolchain("true")
        .run_goal(Goal::Build)
        .unwrap();

    assert!(!report.skipped);
    let dirs: Vec<PathBuf> = report.projects.iter().map(|p| p.directory.clone()).collect();
    assert_eq!(sorted(dirs), sorted(vec![foo, bar]));
    assert!(report.projects.iter().all(|p| p.package.is_none()));
}

#[test]
#[cfg(unix)]
fn test_pack_goal_reports_package() {
    let temp = TempDir::new().unwrap();
    let foo = add_project(temp.path(), "Foo");
    fs::create_dir(foo.join("bin")).unwrap();
    fs::write(foo.join("bin/Foo.1.0.0.nupkg"), "").unwrap();

    let report = helper_for(temp.path())
        .with_toolchain("true")
        .run_goal(Goal::Pack)
        .unwrap();

    assert_eq!(report.projects.len(), 1);
    assert_eq!(
        report.projects[0].package,
        Some(foo.join("bin/Foo.1.0.0.nupkg"))
    );
}

#[test]
#[cfg(unix)]
fn test_pack_goal_without_package_fails() {
    let temp = TempDir::new().unwrap();
    add_project(temp.path(), "Foo");

    let err = helper_for(temp.path())
        .with_toolchain("true")
        .run_goal(Goal::Pack)
        .unwrap_err();

    assert!(matches!(err, GoalError::PackageNotFound(_)));
}

#[test]
#[cfg(unix)]
fn test_goal_stops_on_failure() {
    let temp = TempDir::new().unwrap();
    add_project(temp.path(), "Foo");

    let err = helper_for(temp.path())
        .with_toolchain("false")
        .run_goal(Goal::Restore)
        .unwrap_err();

    match err {
        GoalError::Build(BuildError::NonZeroExit { command, .. }) => {
            assert_eq!(command.to_string(), "[false, restore]");
        }
        other => panic!("Expected NonZeroExit, got {:?}", other),
    }
}
