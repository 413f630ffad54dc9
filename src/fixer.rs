//! The sequential repair runner.
//!
//! Steps execute strictly in plan order. The first failing step ends the run;
//! nothing after it is attempted and nothing before it is undone.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{FixError, Result};
use crate::logging;
use crate::platform::Platform;
use crate::preflight;
use crate::process::{Invocation, ProcessRunner, SystemProcessRunner};
use crate::report;
use crate::steps::{CommandSpec, FixPlan, Phase, Step, StepAction};
use crate::workspace::{LocalWorkspace, Workspace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Completed,
    /// The path a removal step guards did not exist.
    Skipped,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixOutcome {
    pub completed: Vec<Phase>,
    pub skipped: Vec<Phase>,
    pub elapsed: Duration,
}

impl FixOutcome {
    /// Every phase that was visited, in order, whether it did work or not.
    pub fn visited(&self) -> Vec<Phase> {
        let mut phases: Vec<Phase> = self
            .completed
            .iter()
            .chain(self.skipped.iter())
            .copied()
            .collect();
        phases.sort();
        phases
    }
}

pub struct DependencyFixer<R, W> {
    plan: FixPlan,
    platform: Platform,
    runner: R,
    workspace: W,
}

impl<R: ProcessRunner, W: Workspace> DependencyFixer<R, W> {
    pub fn new(plan: FixPlan, platform: Platform, runner: R, workspace: W) -> Self {
        Self {
            plan,
            platform,
            runner,
            workspace,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn run(&self) -> Result<FixOutcome> {
        let started = Instant::now();
        let mut outcome = FixOutcome::default();
        let mut progress = 0;

        for step in self.plan.steps() {
            if let Some(label) = step.phase.progress_label() {
                progress += 1;
                report::print_progress(progress, label);
            }

            match self.execute_step(step)? {
                StepResult::Completed => outcome.completed.push(step.phase),
                StepResult::Skipped => outcome.skipped.push(step.phase),
            }
        }

        outcome.elapsed = started.elapsed();
        logging::log_performance("fix", outcome.elapsed.as_millis() as u64);
        Ok(outcome)
    }

    pub fn execute_step(&self, step: &Step) -> Result<StepResult> {
        match &step.action {
            StepAction::Run(command) => self.run_command(step.phase, command),
            StepAction::RemoveDir(path) => {
                self.remove_if_present(step.phase, path, |ws, p| ws.remove_dir_all(p))
            }
            StepAction::RemoveFile(path) => {
                self.remove_if_present(step.phase, path, |ws, p| ws.remove_file(p))
            }
        }
    }

    fn run_command(&self, phase: Phase, command: &CommandSpec) -> Result<StepResult> {
        let invocation = Invocation::resolve(command, self.platform, self.workspace.root());
        let command_line = command.to_string();
        logging::log_step_started(phase, &command_line);

        let status = self
            .runner
            .run(&invocation)
            .map_err(|e| FixError::spawn(phase, &command_line, e))?;

        logging::log_step_finished(phase, status.success(), status.code);
        if !status.success() {
            return Err(FixError::step_failed(phase, command_line, status.code));
        }

        Ok(StepResult::Completed)
    }

    fn remove_if_present<F>(&self, phase: Phase, path: &Path, remove: F) -> Result<StepResult>
    where
        F: Fn(&W, &Path) -> std::io::Result<()>,
    {
        if !self.workspace.exists(path) {
            logging::log_step_skipped(phase, "not present");
            return Ok(StepResult::Skipped);
        }

        logging::log_step_started(phase, &path.display().to_string());
        remove(&self.workspace, path).map_err(|e| {
            FixError::filesystem(phase, "remove", path.display().to_string(), e)
        })?;
        logging::log_step_finished(phase, true, None);

        Ok(StepResult::Completed)
    }
}

#[derive(Debug, Clone)]
pub struct FixOptions {
    pub project_dir: PathBuf,
    pub platform: Platform,
    pub dry_run: bool,
    pub verbose: bool,
    pub skip_preflight: bool,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            platform: Platform::detect(),
            dry_run: false,
            verbose: false,
            skip_preflight: false,
        }
    }
}

/// The whole command: preflight, then the repair sequence, with console output.
pub struct FixCommand {
    options: FixOptions,
    plan: FixPlan,
}

impl FixCommand {
    pub fn new(options: FixOptions) -> Self {
        Self {
            options,
            plan: FixPlan::standard(),
        }
    }

    pub fn execute(&self) -> Result<Option<FixOutcome>> {
        self.execute_with(SystemProcessRunner::new())
    }

    /// Like [`execute`](Self::execute), but spawning through `runner`.
    pub fn execute_with<R: ProcessRunner>(&self, runner: R) -> Result<Option<FixOutcome>> {
        let options = &self.options;
        logging::log_system_info();

        if !options.project_dir.is_dir() {
            return Err(FixError::Other(anyhow::anyhow!(
                "Project directory does not exist: {}",
                options.project_dir.display()
            )));
        }

        report::print_header();
        preflight::warn_on_project_status(&preflight::detect_project(&options.project_dir));

        if options.dry_run {
            report::print_dry_run(&self.plan, options.platform);
            return Ok(None);
        }

        if !options.skip_preflight {
            let tools = preflight::check_tools(&self.plan.programs(), options.platform)?;
            if options.verbose {
                for tool in &tools {
                    eprintln!("Using {}", tool.display());
                }
            }
        }

        let fixer = DependencyFixer::new(
            self.plan.clone(),
            options.platform,
            runner,
            LocalWorkspace::new(&options.project_dir),
        );
        let outcome = fixer.run()?;

        report::print_success();
        Ok(Some(outcome))
    }

    pub fn report_failure(&self, err: &FixError) {
        report::print_failure(err, &self.plan, self.options.platform);
    }
}
