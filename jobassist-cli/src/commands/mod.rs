//! CLI command implementations

pub mod doctor;
pub mod latency;
pub mod login;
pub mod logout;
pub mod logs;
pub mod signup;
pub mod status;
pub mod whoami;

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use jobassist_core::{AppContext, LogEvent, LoggingService};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let app_dir = get_app_dir();
    // Ensure directory exists
    std::fs::create_dir_all(&app_dir).ok()?;
    LoggingService::new(&app_dir, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the app directory from environment or default
pub fn get_app_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("JOBASSIST_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".jobassist")
    }
}

/// Get or create the app context
pub fn get_context() -> Result<AppContext> {
    let app_dir = get_app_dir();

    // Create directory if it doesn't exist
    std::fs::create_dir_all(&app_dir)
        .with_context(|| format!("Failed to create app directory: {:?}", app_dir))?;

    AppContext::new(&app_dir).context("Failed to initialize app context")
}

/// Get password from --password flag, JOBASSIST_PASSWORD env var, or prompt
pub fn get_password_or_prompt(password_flag: Option<String>, prompt: &str) -> Result<String> {
    // 1. Check --password flag first
    if let Some(p) = password_flag {
        return Ok(p);
    }

    // 2. Check JOBASSIST_PASSWORD environment variable
    if let Ok(p) = std::env::var("JOBASSIST_PASSWORD") {
        return Ok(p);
    }

    // 3. Prompt interactively
    let p = dialoguer::Password::new().with_prompt(prompt).interact()?;
    Ok(p)
}

/// Run an operation behind a spinner while its simulated latency plays out
pub async fn with_spinner<T>(message: &str, op: impl Future<Output = T>) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = op.await;

    spinner.finish_and_clear();
    result
}
