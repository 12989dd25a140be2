//! Login command - sign in to an existing account

use anyhow::Result;
use colored::Colorize;
use jobassist_core::LogEvent;

use super::{get_context, get_logger, get_password_or_prompt, log_event, with_spinner};

pub async fn run(email: &str, password: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();
    let password = get_password_or_prompt(password, "Password")?;

    let result = with_spinner(
        "Signing in...",
        ctx.auth_service.login(email, &password),
    )
    .await;

    match result {
        Ok(identity) => {
            log_event(&logger, LogEvent::new("login_succeeded").with_command("login"));

            if json {
                println!("{}", serde_json::to_string_pretty(&identity)?);
            } else {
                println!("{} Welcome back, {}", "Success!".green(), identity.name);
            }
            Ok(())
        }
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("login_failed")
                    .with_command("login")
                    .with_error(e.to_string()),
            );
            Err(e.into())
        }
    }
}
