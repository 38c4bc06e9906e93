//! infrahist CLI
//!
//! Command-line interface for infrastructure history

use clap::{Parser, Subcommand};
use infrahist_core::logging_facility::{init, Profile};
use infrahist_engine::home::DEFAULT_HOME;
use infrahist_engine::Home;
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "infrahist")]
#[command(about = "infrahist - Infrastructure history across recorded snapshots", long_about = None)]
struct Cli {
    /// Also report unchanged domains, and log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding the history repository and the defaults database
    #[arg(long, global = true, default_value = DEFAULT_HOME)]
    home: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the changes between consecutive recorded snapshots
    History(commands::history::HistoryArgs),
    /// Read and write persisted defaults (e.g. region)
    Config(commands::config::ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.verbose {
        Profile::Development
    } else {
        Profile::Quiet
    });

    let home = Home::new(cli.home);
    let result = match cli.command {
        Commands::History(args) => commands::history::execute(args, &home, cli.verbose),
        Commands::Config(args) => commands::config::execute(args, &home),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
