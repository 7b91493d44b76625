//! sanpol - declarative packet-filter policy management for fabric
//! switches
//!
//! One invocation performs exactly one of:
//! - `apply`: converge declared policies (create missing, update drifted)
//! - `activate`: make a named policy the active one
//! - `delete`: remove named policies
//!
//! `--check` on any of them computes and reports the changes without
//! submitting anything.

use clap::{Parser, Subcommand};

mod commands;
mod connect;
mod error;
mod output;

use error::CliResult;

/// Declarative packet-filter policy management
#[derive(Parser)]
#[command(name = "sanpol")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Converge declared policies from a file
    Apply(commands::apply::ApplyArgs),

    /// Make a policy the active one on the switch
    Activate(commands::activate::ActivateArgs),

    /// Delete policies by name
    Delete(commands::delete::DeleteArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            e.print();
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Apply(args) => commands::apply::execute(args).await,
        Commands::Activate(args) => commands::activate::execute(args).await,
        Commands::Delete(args) => commands::delete::execute(args).await,
    }
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
