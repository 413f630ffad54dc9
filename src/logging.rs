use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::steps::Phase;

/// Initialize structured logging based on verbosity level.
///
/// Logs go to stderr; stdout is reserved for the progress console.
pub fn init_logging(verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("expo_fix=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("expo_fix=warn"))
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    if verbose {
        tracing::info!("Verbose logging enabled");
    }

    Ok(())
}

pub fn log_step_started(phase: Phase, command: &str) {
    tracing::info!(step = phase.name(), command = command, "Step started");
}

pub fn log_step_finished(phase: Phase, success: bool, exit_code: Option<i32>) {
    if success {
        tracing::info!(step = phase.name(), "Step completed");
    } else {
        tracing::error!(step = phase.name(), exit_code = ?exit_code, "Step failed");
    }
}

pub fn log_step_skipped(phase: Phase, reason: &str) {
    tracing::debug!(step = phase.name(), reason = reason, "Step skipped");
}

/// Log system information for debugging
pub fn log_system_info() {
    tracing::debug!(
        os = std::env::consts::OS,
        arch = std::env::consts::ARCH,
        "System information"
    );
}

pub fn log_performance(operation: &str, duration_ms: u64) {
    tracing::debug!(
        operation = operation,
        duration_ms = duration_ms,
        "Operation performance"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging() {
        // Fails if a subscriber is already installed, which is fine here.
        let _ = init_logging(true);
        let _ = init_logging(false);
    }

    #[test]
    fn test_logging_functions() {
        log_step_started(Phase::Install, "npm install --legacy-peer-deps");
        log_step_finished(Phase::Install, true, Some(0));
        log_step_finished(Phase::Install, false, Some(1));
        log_step_skipped(Phase::RemoveLockfile, "not present");
        log_system_info();
        log_performance("fix", 1200);
    }
}
