//! Signup command - create an account and sign in

use anyhow::Result;
use colored::Colorize;
use jobassist_core::LogEvent;

use super::{get_context, get_logger, get_password_or_prompt, log_event, with_spinner};

pub async fn run(email: &str, name: &str, password: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();
    let password = get_password_or_prompt(password, "Password")?;

    let result = with_spinner(
        "Creating account...",
        ctx.auth_service.signup(email, &password, name),
    )
    .await;

    match result {
        Ok(identity) => {
            log_event(&logger, LogEvent::new("signup_succeeded").with_command("signup"));

            if json {
                println!("{}", serde_json::to_string_pretty(&identity)?);
            } else {
                println!(
                    "{} Signed up as {} <{}>",
                    "Success!".green(),
                    identity.name,
                    identity.email
                );
                println!("Account id: {}", identity.id);
            }
            Ok(())
        }
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("signup_failed")
                    .with_command("signup")
                    .with_error(e.to_string()),
            );
            Err(e.into())
        }
    }
}
