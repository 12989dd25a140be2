//! Logout command - sign out

use anyhow::Result;
use jobassist_core::LogEvent;

use super::{get_context, get_logger, log_event, with_spinner};
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();

    let had_session = ctx.auth_service.is_authenticated().await?;
    with_spinner("Signing out...", ctx.auth_service.logout()).await?;
    log_event(&logger, LogEvent::new("logout").with_command("logout"));

    if json {
        println!(
            "{}",
            serde_json::json!({"signed_out": true, "had_session": had_session})
        );
    } else if had_session {
        output::success("Signed out.");
    } else {
        output::warning("No active session.");
    }

    Ok(())
}
