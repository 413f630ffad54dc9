//! End-to-end tests for the expo-fix binary.
//!
//! The happy and failing paths put shell scripts named `npm` and `npx` first on
//! PATH. Each script appends its command line, plus whether `node_modules`
//! existed at that moment, to a log file.

use assert_cmd::Command;
use expo_fix::test_utils::fixtures;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn test_cmd() -> Command {
    Command::cargo_bin("expo-fix").unwrap()
}

#[test]
fn test_help_command() {
    test_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Clears the npm cache"))
        .stdout(predicate::str::contains("Stops at the first failing step."))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--project-dir"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_short_help_uses_summary() {
    test_cmd()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Repair a broken Expo project dependency installation",
        ));
}

#[test]
fn test_version_command() {
    test_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("expo-fix 0.1.0"));
}

#[test]
fn test_unexpected_argument_is_rejected() {
    test_cmd().arg("install").assert().failure().code(2);
}

#[test]
fn test_dry_run_lists_steps_without_touching_project() {
    let temp = TempDir::new().unwrap();
    fixtures::broken_project(temp.path()).unwrap();

    test_cmd()
        .arg("--dry-run")
        .arg("-C")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN"))
        .stdout(predicate::str::contains("npm install --legacy-peer-deps"))
        .stdout(predicate::str::contains("npx expo-doctor"))
        .stdout(predicate::str::contains("No changes were made."));

    assert!(temp.path().join("node_modules").exists());
    assert!(temp.path().join("package-lock.json").exists());
}

#[test]
fn test_missing_project_dir_fails_with_checklist() {
    let temp = TempDir::new().unwrap();

    test_cmd()
        .arg("-C")
        .arg(temp.path().join("nope"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error fixing dependencies"))
        .stdout(predicate::str::contains("Try running these commands manually:"));
}

#[cfg(unix)]
mod with_fake_tools {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    const FAKE_TOOL: &str = r#"#!/bin/sh
name=$(basename "$0")
if [ -d node_modules ]; then deps=yes; else deps=no; fi
echo "$name $* [deps:$deps]" >> "$FAKE_LOG"
if [ -n "$FAKE_FAIL" ] && [ "$name $*" = "$FAKE_FAIL" ]; then
  exit 1
fi
exit 0
"#;

    struct Sandbox {
        _bin: TempDir,
        bin_dir: PathBuf,
        project: TempDir,
        log: PathBuf,
    }

    impl Sandbox {
        fn new() -> Self {
            let bin = TempDir::new().unwrap();
            let bin_dir = bin.path().to_path_buf();
            for tool in ["npm", "npx"] {
                let path = bin_dir.join(tool);
                fs::write(&path, FAKE_TOOL).unwrap();
                fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            }

            let project = TempDir::new().unwrap();
            fixtures::write_manifest(project.path()).unwrap();
            let log = bin_dir.join("calls.log");

            Self {
                _bin: bin,
                bin_dir,
                project,
                log,
            }
        }

        fn root(&self) -> &Path {
            self.project.path()
        }

        fn command(&self) -> Command {
            let path = std::env::var("PATH").unwrap_or_default();
            let mut cmd = test_cmd();
            cmd.current_dir(self.root())
                .env("PATH", format!("{}:{}", self.bin_dir.display(), path))
                .env("FAKE_LOG", &self.log)
                .env_remove("FAKE_FAIL");
            cmd
        }

        fn calls(&self) -> Vec<String> {
            fs::read_to_string(&self.log)
                .unwrap_or_default()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    #[test]
    fn test_all_steps_succeed_on_clean_project() {
        let sandbox = Sandbox::new();

        sandbox
            .command()
            .assert()
            .success()
            .stdout(predicate::str::contains("Fixing Expo project dependencies"))
            .stdout(predicate::str::contains("1. Clearing npm cache..."))
            .stdout(predicate::str::contains("6. Running final health check..."))
            .stdout(predicate::str::contains("Dependencies fixed successfully!"))
            .stdout(predicate::str::contains("You can now run: npx expo start"));

        assert_eq!(
            sandbox.calls(),
            vec![
                "npm cache clean --force [deps:no]",
                "npm install --legacy-peer-deps [deps:no]",
                "npx expo install --fix [deps:no]",
                "npx expo install @expo/metro-runtime react-native-worklets [deps:no]",
                "npx expo-doctor [deps:no]",
            ]
        );
    }

    #[test]
    fn test_existing_deps_removed_before_install() {
        let sandbox = Sandbox::new();
        fixtures::write_deps_dir(sandbox.root()).unwrap();
        fixtures::write_lockfile(sandbox.root()).unwrap();

        sandbox.command().assert().success();

        let calls = sandbox.calls();
        assert_eq!(calls[0], "npm cache clean --force [deps:yes]");
        assert_eq!(calls[1], "npm install --legacy-peer-deps [deps:no]");
        assert!(!sandbox.root().join("package-lock.json").exists());
    }

    #[test]
    fn test_install_failure_stops_the_run() {
        let sandbox = Sandbox::new();

        sandbox
            .command()
            .env("FAKE_FAIL", "npm install --legacy-peer-deps")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Error fixing dependencies"))
            .stderr(predicate::str::contains("npm install --legacy-peer-deps"))
            .stdout(predicate::str::contains("Try running these commands manually:"))
            .stdout(predicate::str::contains("1. npm cache clean --force"))
            .stdout(predicate::str::contains("2. rm -rf node_modules"))
            .stdout(predicate::str::contains("3. rm -f package-lock.json"))
            .stdout(predicate::str::contains(
                "6. npx expo install @expo/metro-runtime react-native-worklets",
            ))
            .stdout(predicate::str::contains("Dependencies fixed successfully!").not());

        let calls = sandbox.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| c.starts_with("npm ")));
    }

    #[test]
    fn test_missing_tools_fail_preflight() {
        let sandbox = Sandbox::new();
        let empty = TempDir::new().unwrap();

        sandbox
            .command()
            .env("PATH", empty.path())
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Required tool not found on PATH"))
            .stdout(predicate::str::contains("Try running these commands manually:"));

        assert!(sandbox.calls().is_empty());
    }

    #[test]
    fn test_verbose_mode() {
        let sandbox = Sandbox::new();

        sandbox
            .command()
            .arg("--verbose")
            .assert()
            .success()
            .stderr(predicate::str::contains("Verbose mode enabled"));
    }

    #[test]
    fn test_warns_when_not_an_expo_project() {
        let sandbox = Sandbox::new();
        fs::write(
            sandbox.root().join("package.json"),
            r#"{"name": "plain", "dependencies": {}}"#,
        )
        .unwrap();

        sandbox
            .command()
            .assert()
            .success()
            .stdout(predicate::str::contains("does not list expo"));
    }
}
