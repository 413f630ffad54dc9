use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::process;

use expo_fix::logging;
use expo_fix::{FixCommand, FixOptions, Platform};

#[derive(Parser)]
#[command(name = "expo-fix")]
#[command(version = "0.1.0")]
#[command(
    about = "Repair a broken Expo project dependency installation",
    long_about = "Clears the npm cache, removes node_modules and package-lock.json, \
                  reinstalls with --legacy-peer-deps, lets Expo align its packages \
                  and finishes with expo-doctor. Stops at the first failing step."
)]
struct Cli {
    #[arg(short, long, help = "Enable verbose output")]
    verbose: bool,

    #[arg(long, help = "Show the steps without running anything")]
    dry_run: bool,

    #[arg(
        short = 'C',
        long,
        default_value = ".",
        help = "Project directory to repair"
    )]
    project_dir: PathBuf,

    #[arg(long, help = "Do not check that npm and npx are on PATH")]
    skip_preflight: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        eprintln!("{}", "Verbose mode enabled".dimmed());
    }

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("{} {}", "⚠".yellow(), e);
    }

    let platform = Platform::detect();
    if cli.verbose {
        eprintln!("{} Detected platform: {:?}", "ℹ".blue(), platform);
    }

    let command = FixCommand::new(FixOptions {
        project_dir: cli.project_dir,
        platform,
        dry_run: cli.dry_run,
        verbose: cli.verbose,
        skip_preflight: cli.skip_preflight,
    });

    if let Err(e) = command.execute() {
        command.report_failure(&e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_without_arguments() {
        let cli = Cli::try_parse_from(["expo-fix"]).unwrap();
        assert!(!cli.verbose);
        assert!(!cli.dry_run);
        assert!(!cli.skip_preflight);
        assert_eq!(cli.project_dir, PathBuf::from("."));
    }

    #[test]
    fn test_flags() {
        let cli =
            Cli::try_parse_from(["expo-fix", "-v", "--dry-run", "-C", "apps/mobile"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.dry_run);
        assert_eq!(cli.project_dir, PathBuf::from("apps/mobile"));
    }
}
