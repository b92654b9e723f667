//! Strata CLI - Command-line interface
//!
//! Commands:
//! - play: Play a game of three-layer chess in the terminal
//! - serve: Start the HTTP API server

mod play;
mod server;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Strata three-layer chess")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play(play::PlayArgs),
    /// Start the API server
    Serve(server::ServerArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Serve(args) => server::run(args),
    }
}
