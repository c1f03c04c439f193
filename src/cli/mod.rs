//! CLI module
//!
//! Command-line interface for working with Docmail responses offline.
//!
//! # Commands
//!
//! - `decode` - Decode a saved XML response into JSON
//! - `normalize` - Print canonical field names for labels
//! - `check-config` - Validate a client config file

mod commands;
mod runner;

pub use commands::{Cli, Commands, DecodeKind, OutputFormat};
pub use runner::Runner;
