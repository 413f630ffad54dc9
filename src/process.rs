use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::platform::Platform;
use crate::steps::CommandSpec;

/// A fully resolved child process: what gets spawned and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl Invocation {
    pub fn resolve(command: &CommandSpec, platform: Platform, working_dir: &Path) -> Self {
        let (program, args) = platform.resolve_command(&command.program, &command.args);
        Self {
            program,
            args,
            working_dir: working_dir.to_path_buf(),
        }
    }

    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Exit status of a finished child. `code` is `None` when it was killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    pub code: Option<i32>,
}

impl ProcessStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ProcessStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

pub trait ProcessRunner {
    /// Run the child to completion, blocking the caller.
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessStatus>;
}

impl<R: ProcessRunner> ProcessRunner for &R {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessStatus> {
        (**self).run(invocation)
    }
}

/// Spawns real processes that share the parent's stdin, stdout and stderr.
#[derive(Debug, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessStatus> {
        tracing::debug!(
            command = %invocation.command_line(),
            dir = %invocation.working_dir.display(),
            "Spawning process"
        );

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .status()?;

        Ok(status.into())
    }
}
