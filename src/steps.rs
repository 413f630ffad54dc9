//! Declarative description of the repair sequence.
//!
//! The plan is data: each [`Step`] names the phase it belongs to and the
//! action it performs. Executing it is left to [`crate::fixer`], which keeps
//! the sequence testable against fake process runners and workspaces.

use std::fmt;
use std::path::PathBuf;

use crate::platform::Platform;

pub const DEPS_DIR: &str = "node_modules";
pub const LOCKFILE: &str = "package-lock.json";
pub const EXTRA_PACKAGES: [&str; 2] = ["@expo/metro-runtime", "react-native-worklets"];
pub const NEXT_COMMAND: &str = "npx expo start";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    ClearCache,
    RemoveDepsDir,
    RemoveLockfile,
    Install,
    FrameworkFix,
    InstallExtra,
    HealthCheck,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::ClearCache,
        Phase::RemoveDepsDir,
        Phase::RemoveLockfile,
        Phase::Install,
        Phase::FrameworkFix,
        Phase::InstallExtra,
        Phase::HealthCheck,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Phase::ClearCache => "clear-cache",
            Phase::RemoveDepsDir => "remove-deps-dir",
            Phase::RemoveLockfile => "remove-lockfile",
            Phase::Install => "install",
            Phase::FrameworkFix => "framework-fix",
            Phase::InstallExtra => "install-extra",
            Phase::HealthCheck => "health-check",
        }
    }

    /// Progress line printed when the phase starts. The two removals share one.
    pub fn progress_label(&self) -> Option<&'static str> {
        match self {
            Phase::ClearCache => Some("Clearing npm cache..."),
            Phase::RemoveDepsDir => Some("Removing old dependencies..."),
            Phase::RemoveLockfile => None,
            Phase::Install => Some("Installing dependencies with legacy peer deps..."),
            Phase::FrameworkFix => Some("Fixing Expo dependencies..."),
            Phase::InstallExtra => Some("Installing missing peer dependencies..."),
            Phase::HealthCheck => Some("Running final health check..."),
        }
    }

    /// Whether the phase belongs on the manual recovery checklist.
    ///
    /// The health check only reports; it repairs nothing by hand.
    pub fn is_repair(&self) -> bool {
        !matches!(self, Phase::HealthCheck)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A platform-independent tool invocation such as `npm install`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    Run(CommandSpec),
    /// Remove a directory tree, relative to the project root, if present.
    RemoveDir(PathBuf),
    /// Remove a single file, relative to the project root, if present.
    RemoveFile(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub phase: Phase,
    pub action: StepAction,
}

impl Step {
    pub fn run(phase: Phase, command: CommandSpec) -> Self {
        Self {
            phase,
            action: StepAction::Run(command),
        }
    }

    /// The command a user would type to perform this step by hand.
    pub fn manual_command(&self, platform: Platform) -> String {
        match &self.action {
            StepAction::Run(command) => command.to_string(),
            StepAction::RemoveDir(path) => platform.remove_dir_command(&path.to_string_lossy()),
            StepAction::RemoveFile(path) => platform.remove_file_command(&path.to_string_lossy()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixPlan {
    steps: Vec<Step>,
}

impl FixPlan {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// The fixed repair sequence for an npm-managed Expo project.
    pub fn standard() -> Self {
        let mut extra = vec!["expo".to_string(), "install".to_string()];
        extra.extend(EXTRA_PACKAGES.iter().map(|p| p.to_string()));

        Self::new(vec![
            Step::run(
                Phase::ClearCache,
                CommandSpec::new("npm", ["cache", "clean", "--force"]),
            ),
            Step {
                phase: Phase::RemoveDepsDir,
                action: StepAction::RemoveDir(PathBuf::from(DEPS_DIR)),
            },
            Step {
                phase: Phase::RemoveLockfile,
                action: StepAction::RemoveFile(PathBuf::from(LOCKFILE)),
            },
            Step::run(
                Phase::Install,
                CommandSpec::new("npm", ["install", "--legacy-peer-deps"]),
            ),
            Step::run(
                Phase::FrameworkFix,
                CommandSpec::new("npx", ["expo", "install", "--fix"]),
            ),
            Step::run(Phase::InstallExtra, CommandSpec::new("npx", extra)),
            Step::run(Phase::HealthCheck, CommandSpec::new("npx", ["expo-doctor"])),
        ])
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Programs the plan shells out to, in first-use order, without duplicates.
    pub fn programs(&self) -> Vec<&str> {
        let mut programs: Vec<&str> = Vec::new();
        for step in &self.steps {
            if let StepAction::Run(command) = &step.action {
                if !programs.contains(&command.program.as_str()) {
                    programs.push(&command.program);
                }
            }
        }
        programs
    }

    /// Literal commands for the manual recovery checklist.
    pub fn manual_commands(&self, platform: Platform) -> Vec<String> {
        self.steps
            .iter()
            .filter(|step| step.phase.is_repair())
            .map(|step| step.manual_command(platform))
            .collect()
    }
}
