//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Docmail client CLI
#[derive(Parser, Debug)]
#[command(name = "docmail")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a saved Docmail XML response
    Decode {
        /// Response file, or `-` for stdin
        input: String,

        /// What to decode the response into
        #[arg(short, long, default_value = "record")]
        kind: DecodeKind,
    },

    /// Print the canonical field name for each label
    Normalize {
        /// Raw field labels
        #[arg(required = true)]
        labels: Vec<String>,
    },

    /// Load and validate a client config file (YAML)
    CheckConfig {
        /// Config file
        file: PathBuf,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON (one document per line)
    Json,
    /// Indented JSON
    Pretty,
}

/// Target a response is decoded into
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DecodeKind {
    /// Plain field record
    Record,
    /// Mailing details
    Mailing,
}
