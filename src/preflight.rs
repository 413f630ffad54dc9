//! Checks run before the repair sequence starts.
//!
//! Tool lookup is fatal: without npm or npx nothing downstream can work.
//! Project detection only warns, since a missing or odd `package.json` is
//! exactly the kind of breakage people run this tool against.

use colored::Colorize;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FixError, Result};
use crate::platform::Platform;

pub const MANIFEST: &str = "package.json";

/// Locate every program the plan shells out to.
pub fn check_tools(programs: &[&str], platform: Platform) -> Result<Vec<PathBuf>> {
    programs
        .iter()
        .map(|program| find_tool(program, platform))
        .collect()
}

pub fn find_tool(tool: &str, platform: Platform) -> Result<PathBuf> {
    for candidate in platform.executable_candidates(tool) {
        if let Ok(path) = which::which(&candidate) {
            tracing::debug!(tool = tool, path = %path.display(), "Found tool");
            return Ok(path);
        }
    }

    Err(FixError::missing_tool(tool, install_guidance(platform)))
}

fn install_guidance(platform: Platform) -> String {
    let mut guidance = String::from(
        "1. Install Node.js (npm and npx ship with it) from https://nodejs.org/\n  \
         2. Restart your terminal",
    );
    if platform.is_windows() {
        guidance.push_str(
            "\n  3. If it is still not found, use the Node.js command prompt \
             or add Node.js to your system PATH",
        );
    }
    guidance
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Manifest {
    name: Option<String>,
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
    #[serde(default)]
    dev_dependencies: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: Option<String>,
    pub expo_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectStatus {
    Expo(ProjectInfo),
    NotExpo(ProjectInfo),
    MissingManifest,
    InvalidManifest(String),
}

pub fn detect_project(dir: &Path) -> ProjectStatus {
    let path = dir.join(MANIFEST);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return ProjectStatus::MissingManifest,
    };

    let manifest: Manifest = match serde_json::from_str(&content) {
        Ok(manifest) => manifest,
        Err(e) => return ProjectStatus::InvalidManifest(e.to_string()),
    };

    let expo_version = manifest
        .dependencies
        .get("expo")
        .or_else(|| manifest.dev_dependencies.get("expo"))
        .cloned();

    let info = ProjectInfo {
        name: manifest.name,
        expo_version,
    };

    if info.expo_version.is_some() {
        ProjectStatus::Expo(info)
    } else {
        ProjectStatus::NotExpo(info)
    }
}

/// Print a warning for anything that does not look like an Expo project.
pub fn warn_on_project_status(status: &ProjectStatus) {
    match status {
        ProjectStatus::Expo(info) => {
            tracing::debug!(
                project = info.name.as_deref().unwrap_or("<unnamed>"),
                expo = info.expo_version.as_deref().unwrap_or_default(),
                "Detected Expo project"
            );
        }
        ProjectStatus::NotExpo(_) => {
            println!(
                "{} {} does not list expo as a dependency; continuing anyway",
                "⚠".yellow(),
                MANIFEST
            );
        }
        ProjectStatus::MissingManifest => {
            println!(
                "{} No {} found in the project directory; continuing anyway",
                "⚠".yellow(),
                MANIFEST
            );
        }
        ProjectStatus::InvalidManifest(reason) => {
            println!(
                "{} Could not parse {}: {}; continuing anyway",
                "⚠".yellow(),
                MANIFEST,
                reason
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detect_expo_dependency() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(MANIFEST),
            r#"{"name": "my-app", "dependencies": {"expo": "~51.0.0", "react": "18.2.0"}}"#,
        )
        .unwrap();

        let status = detect_project(temp.path());
        assert_eq!(
            status,
            ProjectStatus::Expo(ProjectInfo {
                name: Some("my-app".to_string()),
                expo_version: Some("~51.0.0".to_string()),
            })
        );
    }

    #[test]
    fn test_detect_expo_dev_dependency() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(MANIFEST),
            r#"{"devDependencies": {"expo": "^50.0.0"}}"#,
        )
        .unwrap();

        match detect_project(temp.path()) {
            ProjectStatus::Expo(info) => {
                assert!(info.name.is_none());
                assert_eq!(info.expo_version.as_deref(), Some("^50.0.0"));
            }
            other => panic!("Expected Expo project, got {other:?}"),
        }
    }

    #[test]
    fn test_detect_not_expo() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(MANIFEST),
            r#"{"name": "server", "dependencies": {"express": "4.0.0"}}"#,
        )
        .unwrap();

        assert!(matches!(
            detect_project(temp.path()),
            ProjectStatus::NotExpo(_)
        ));
    }

    #[test]
    fn test_detect_missing_and_invalid() {
        let temp = TempDir::new().unwrap();
        assert_eq!(detect_project(temp.path()), ProjectStatus::MissingManifest);

        fs::write(temp.path().join(MANIFEST), "{ not json").unwrap();
        assert!(matches!(
            detect_project(temp.path()),
            ProjectStatus::InvalidManifest(_)
        ));
    }

    #[test]
    fn test_find_tool_missing() {
        let err = find_tool("definitely-not-a-real-tool-xyz", Platform::Linux).unwrap_err();
        match err {
            FixError::MissingTool { tool, .. } => {
                assert_eq!(tool, "definitely-not-a-real-tool-xyz")
            }
            other => panic!("Expected MissingTool, got {other:?}"),
        }
    }

    #[test]
    fn test_windows_guidance_mentions_path() {
        assert!(install_guidance(Platform::Windows).contains("system PATH"));
        assert!(!install_guidance(Platform::Linux).contains("system PATH"));
    }
}
