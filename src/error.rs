use colored::Colorize;
use std::fmt;

use crate::steps::Phase;

#[derive(Debug)]
pub enum FixError {
    MissingTool {
        tool: String,
        install_guidance: String,
    },
    StepFailed {
        phase: Phase,
        command: String,
        exit_code: Option<i32>,
    },
    Spawn {
        phase: Phase,
        command: String,
        source: std::io::Error,
    },
    Filesystem {
        phase: Phase,
        operation: String,
        path: String,
        source: std::io::Error,
    },
    Other(anyhow::Error),
}

impl FixError {
    pub fn missing_tool(tool: impl Into<String>, install_guidance: impl Into<String>) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            install_guidance: install_guidance.into(),
        }
    }

    pub fn step_failed(phase: Phase, command: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self::StepFailed {
            phase,
            command: command.into(),
            exit_code,
        }
    }

    pub fn spawn(phase: Phase, command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            phase,
            command: command.into(),
            source,
        }
    }

    pub fn filesystem(
        phase: Phase,
        operation: impl Into<String>,
        path: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::Filesystem {
            phase,
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// The phase that was running, if the failure happened inside the sequence.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::StepFailed { phase, .. }
            | Self::Spawn { phase, .. }
            | Self::Filesystem { phase, .. } => Some(*phase),
            Self::MissingTool { .. } | Self::Other(_) => None,
        }
    }
}

impl fmt::Display for FixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTool {
                tool,
                install_guidance,
            } => {
                writeln!(
                    f,
                    "{} Required tool not found on PATH: {}",
                    "✗".red().bold(),
                    tool.yellow()
                )?;
                writeln!(f)?;
                writeln!(f, "{}", "How to install:".green().bold())?;
                write!(f, "  {install_guidance}")
            }
            Self::StepFailed {
                phase,
                command,
                exit_code,
            } => {
                match exit_code {
                    Some(code) => write!(f, "Command failed: {command} (exit status {code})")?,
                    None => write!(f, "Command failed: {command} (terminated by signal)")?,
                }
                write!(f, "\n  {} Step: {}", "→".blue(), phase)
            }
            Self::Spawn {
                phase,
                command,
                source,
            } => {
                write!(f, "Failed to execute command: {command}: {source}")?;
                write!(f, "\n  {} Step: {}", "→".blue(), phase)
            }
            Self::Filesystem {
                phase,
                operation,
                path,
                source,
            } => {
                write!(f, "Failed to {operation} {path}: {source}")?;
                write!(f, "\n  {} Step: {}", "→".blue(), phase)
            }
            Self::Other(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for FixError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } | Self::Filesystem { source, .. } => Some(source),
            Self::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for FixError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err)
    }
}

pub type Result<T> = std::result::Result<T, FixError>;
