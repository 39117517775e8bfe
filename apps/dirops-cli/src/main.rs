//! dirops CLI - directory operations for helpdesk operators
//!
//! Subcommands:
//! - `search`: bulk user lookup from comma-separated terms (or a tagged
//!   line file)
//! - `disable`: ticket-tracked bulk account disable

use clap::{Parser, Subcommand};

mod commands;
mod error;
mod output;
mod prompts;

use error::CliResult;

/// Directory operations CLI
#[derive(Parser)]
#[command(name = "dirops")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bulk user search from comma-separated terms
    Search(commands::search::SearchArgs),

    /// Disable accounts under a ticket number
    Disable(commands::disable::DisableArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            e.print();
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Search(args) => commands::search::execute(args).await,
        Commands::Disable(args) => commands::disable::execute(args).await,
    }
}
