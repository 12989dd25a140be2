//! Status command - show account store status and summary

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let status = ctx.status_service.summary().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Account Store Status".bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Registered accounts", &status.total_identities.to_string()]);
    table.add_row(vec!["Signed in", if status.signed_in { "yes" } else { "no" }]);
    println!("{}", table);
    println!();

    if let Some(user) = &status.current_user {
        println!("Current session: {} <{}>", user.name, user.email);
        println!();
    }

    if !status.identities.is_empty() {
        println!("{}", "Registered Accounts".bold());
        for identity in &status.identities {
            println!("  • {} <{}>", identity.name, identity.email);
        }
    }

    Ok(())
}
