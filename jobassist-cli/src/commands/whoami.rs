//! Whoami command - show the signed-in account

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = ctx.auth_service.current_user().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    match user {
        Some(user) => {
            println!("{} <{}>", user.name.bold(), user.email);
            println!("Account id: {}", user.id);
        }
        None => output::info("Not signed in."),
    }

    Ok(())
}
