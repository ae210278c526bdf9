//! slipgrid CLI - tabular Q-learning on a slippery grid world

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "slipgrid")]
#[command(version, about = "Tabular Q-learning on a slippery grid world", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the agent, dump the Q-table, and replay the learned policy
    Train(slipgrid::cli::commands::train::TrainArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => slipgrid::cli::commands::train::execute(args),
    }
}
