//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "memsift",
    version,
    about = "Scan messages for notable entities and file them into a tiered memory store",
    long_about = "Memsift scans free-form text for recognizable entities (emails, URLs, commits, \
                  financial figures, dates, secrets, ...), classifies each hit into a content \
                  category and a hot/warm/cold storage tier, deduplicates, and persists one JSON \
                  record per detection."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/memsift/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan one message and persist the extracted records
    Scan {
        /// Message text to scan
        text: String,

        /// Source channel tag (defaults to the configured default_source)
        #[arg(short, long)]
        source: Option<String>,

        /// Print extracted records as JSON
        #[arg(long)]
        json: bool,

        /// Extract without persisting anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Print the active configuration
    Show,

    /// Validate the configuration file
    Validate,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
