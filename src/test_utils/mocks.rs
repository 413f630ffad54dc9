//! Common mock implementations for testing
//!
//! [`RecordingRunner`] stands in for real process execution: it records every
//! invocation and answers with a configurable exit status, so the repair
//! sequence can be exercised without npm or npx installed.

use std::cell::RefCell;
use std::io;

use crate::process::{Invocation, ProcessRunner, ProcessStatus};

type Observer = Box<dyn Fn(&Invocation)>;

enum Response {
    Exit(i32),
    SpawnError,
}

/// A process runner that records invocations instead of spawning anything.
pub struct RecordingRunner {
    invocations: RefCell<Vec<Invocation>>,
    rules: Vec<(String, Response)>,
    observer: Option<Observer>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self {
            invocations: RefCell::new(Vec::new()),
            rules: Vec::new(),
            observer: None,
        }
    }

    /// Exit with `code` for any command line containing `pattern`.
    pub fn fail_on(mut self, pattern: impl Into<String>, code: i32) -> Self {
        self.rules.push((pattern.into(), Response::Exit(code)));
        self
    }

    /// Fail to spawn any command line containing `pattern`.
    pub fn spawn_error_on(mut self, pattern: impl Into<String>) -> Self {
        self.rules.push((pattern.into(), Response::SpawnError));
        self
    }

    /// Called with each invocation before it is answered.
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(&Invocation) + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .map(Invocation::command_line)
            .collect()
    }
}

impl Default for RecordingRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessStatus> {
        if let Some(observer) = &self.observer {
            observer(invocation);
        }
        self.invocations.borrow_mut().push(invocation.clone());

        let line = invocation.command_line();
        for (pattern, response) in &self.rules {
            if line.contains(pattern.as_str()) {
                return match response {
                    Response::Exit(code) => Ok(ProcessStatus::from_code(*code)),
                    Response::SpawnError => Err(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("program not found: {}", invocation.program),
                    )),
                };
            }
        }

        Ok(ProcessStatus::from_code(0))
    }
}
