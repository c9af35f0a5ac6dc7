mod platform;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use platform::logging::LogDestination;

/// Browse the Pokedex from the terminal.
#[derive(Debug, Parser)]
#[command(name = "pokedex", version, about)]
pub struct Cli {
    /// RON settings file; missing fields fall back to defaults.
    #[arg(long, default_value = "./pokedex.ron")]
    pub settings: PathBuf,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Log at debug level.
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List creatures, optionally filtered by name.
    List {
        /// Case-insensitive name filter.
        #[arg(long, short)]
        search: Option<String>,
        /// Page size; defaults to the settings file value.
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Show the full detail screen for one creature.
    Show {
        name: String,
    },
}

fn main() -> anyhow::Result<()> {
    platform::run_app(Cli::parse())
}
