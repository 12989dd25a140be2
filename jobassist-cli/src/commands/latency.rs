//! Latency command - show or set the simulated network latency

use anyhow::Result;
use jobassist_core::config::Config;

use super::get_app_dir;
use crate::output;

pub fn run(ms: Option<u64>, reset: bool) -> Result<()> {
    let app_dir = get_app_dir();
    std::fs::create_dir_all(&app_dir)?;
    let mut config = Config::load(&app_dir)?;

    if reset {
        config.latency_ms = None;
        config.save(&app_dir)?;
        output::success("Latency reset to built-in defaults");
        return Ok(());
    }

    match ms {
        Some(ms) => {
            config.latency_ms = Some(ms);
            config.save(&app_dir)?;
            output::success(&format!("Simulated latency set to {}ms", ms));
        }
        None => match config.latency_ms {
            Some(ms) => println!("Simulated latency: {}ms", ms),
            None => println!("Simulated latency: defaults (signup/login 500ms, logout 300ms)"),
        },
    }

    Ok(())
}
