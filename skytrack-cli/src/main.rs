//! SkyTrack CLI - Command-line interface
//!
//! Receives simulator telemetry over UDP and shows live flight statistics.

mod commands;
mod error;
mod runner;
mod ui;

use clap::{Parser, Subcommand};
use skytrack::units::UnitSystem;

use commands::config::ConfigCommands;
use commands::run::RunArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "skytrack")]
#[command(version, about = "Live flight tracker for simulator UDP telemetry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Listen for telemetry and display live flight statistics
    Run {
        /// UDP port to listen on (overrides telemetry.port)
        #[arg(long)]
        port: Option<u16>,

        /// Display units: imperial or metric (overrides display.units)
        #[arg(long)]
        units: Option<UnitSystem>,

        /// Enable debug-level logging
        #[arg(long)]
        debug: bool,

        /// Print plain text instead of the full-screen dashboard
        #[arg(long)]
        no_tui: bool,
    },

    /// Decode a single datagram line and print the result
    Parse {
        /// Datagram text, e.g. "XATTAerofly FS 4,45.5,5.2,-3.1"
        line: String,

        /// Simulator name expected after the record tag
        #[arg(long)]
        client: Option<String>,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli.command) {
        e.exit();
    }
}

fn dispatch(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Run {
            port,
            units,
            debug,
            no_tui,
        } => commands::run::run(RunArgs {
            port,
            units,
            debug,
            no_tui,
        }),
        Commands::Parse { line, client } => commands::parse::run(&line, client.as_deref()),
        Commands::Config { command } => commands::config::run(command),
    }
}
