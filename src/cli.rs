use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "unable")]
#[command(author, version, about = "Decrypt able-encrypted AIFF/AIFC audio files")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decrypt one or more files and write plain AIFC copies
    Decrypt {
        /// Input files to decrypt
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (only with a single input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace existing output files
        #[arg(long)]
        force: bool,
    },

    /// Show the chunk layout and audio format of a file
    Inspect {
        /// File to inspect
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
