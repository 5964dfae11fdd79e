use std::path::PathBuf;

use clap::Parser;

use crate::Commands;

/// Main CLI application arguments and command structure
#[derive(Parser)]
#[clap(
    version,
    about = "Tagged, searchable markdown notes in the terminal"
)]
pub struct Cli {
    /// Path to the data directory (defaults to the platform data location)
    #[clap(long, value_parser)]
    pub data_dir: Option<PathBuf>,

    /// Editor command used for interactive note editing
    #[clap(long)]
    pub editor: Option<String>,

    /// Verbose output mode
    #[clap(short, long)]
    pub verbose: bool,

    /// Subcommands for the tagnotes application
    #[clap(subcommand)]
    pub command: Commands,
}
