//! Job Application Assistant CLI - manage your account from the terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{doctor, latency, login, logout, logs, signup, status, whoami};

/// Job application assistant in your terminal
#[derive(Parser)]
#[command(name = "ja", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in
    Signup {
        /// Email address (one account per email)
        email: String,
        /// Display name
        name: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign in to an existing account
    Login {
        /// Email address
        email: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign out
    Logout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the signed-in account
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show account store status and summary
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run store health checks
    Doctor {
        /// Show verbose output
        #[arg(long, short)]
        verbose: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },

    /// Show or set the simulated network latency
    Latency {
        /// Latency in milliseconds (shows the current value when omitted)
        ms: Option<u64>,
        /// Reset to the built-in defaults
        #[arg(long)]
        reset: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Signup { email, name, password, json } => {
            signup::run(&email, &name, password, json).await
        }
        Commands::Login { email, password, json } => login::run(&email, password, json).await,
        Commands::Logout { json } => logout::run(json).await,
        Commands::Whoami { json } => whoami::run(json).await,
        Commands::Status { json } => status::run(json).await,
        Commands::Doctor { verbose, json } => doctor::run(verbose, json).await,
        Commands::Logs { command } => logs::run(command),
        Commands::Latency { ms, reset } => latency::run(ms, reset),
    }
}
