//! provchain CLI entry point.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod demo;
mod render;
mod session;

#[derive(Parser)]
#[command(name = "provchain")]
#[command(about = "A supply-chain provenance ledger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start an interactive ledger session
    Session,
    /// Run the scripted end-to-end demo
    Demo,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Demo) => demo::run(),
        Some(Command::Session) | None => session::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
