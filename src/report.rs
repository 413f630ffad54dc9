//! Console output for the repair run.

use colored::Colorize;

use crate::error::FixError;
use crate::platform::Platform;
use crate::steps::{FixPlan, NEXT_COMMAND};

pub const HEADER: &str = "🔧 Fixing Expo project dependencies...";
pub const SUCCESS: &str = "✅ Dependencies fixed successfully!";
pub const FAILURE: &str = "❌ Error fixing dependencies:";
pub const CHECKLIST_INTRO: &str = "Try running these commands manually:";

pub fn print_header() {
    println!("{}", HEADER.blue().bold());
    println!();
}

pub fn progress_line(number: usize, label: &str) -> String {
    format!("{number}. {label}")
}

pub fn print_progress(number: usize, label: &str) {
    println!("{}", progress_line(number, label).cyan());
}

pub fn print_success() {
    println!();
    println!("{}", SUCCESS.green().bold());
    println!("You can now run: {}", NEXT_COMMAND.cyan());
}

/// Numbered manual recovery commands, one per repair step.
pub fn manual_checklist(plan: &FixPlan, platform: Platform) -> Vec<String> {
    plan.manual_commands(platform)
        .into_iter()
        .enumerate()
        .map(|(i, command)| format!("{}. {}", i + 1, command))
        .collect()
}

pub fn print_failure(err: &FixError, plan: &FixPlan, platform: Platform) {
    eprintln!();
    eprintln!("{} {}", FAILURE.red().bold(), err);

    println!();
    println!("{}", CHECKLIST_INTRO.yellow());
    for line in manual_checklist(plan, platform) {
        println!("{line}");
    }
}

pub fn print_dry_run(plan: &FixPlan, platform: Platform) {
    println!("{}", "🔍 [DRY RUN] The following steps would run:".blue());
    for (i, step) in plan.steps().iter().enumerate() {
        println!(
            "  {}. {} {}",
            i + 1,
            step.manual_command(platform).cyan(),
            format!("({})", step.phase).dimmed()
        );
    }
    println!();
    println!("{}", "No changes were made.".dimmed());
}
