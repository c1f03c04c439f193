//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, DecodeKind, OutputFormat};
use crate::config::load_config;
use crate::decode::{normalize_label, DecodedRecord, ResponseDecoder};
use crate::error::{Error, Result, ResultExt};
use crate::model::Mailing;
use serde_json::{json, Value};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing results to stdout
    pub async fn run(&self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out)
    }

    /// Run the CLI command, writing results to `out`
    pub fn run_to<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.cli.command {
            Commands::Decode { input, kind } => self.decode(input, *kind, out),
            Commands::Normalize { labels } => self.normalize(labels, out),
            Commands::CheckConfig { file } => self.check_config(file, out),
        }
    }

    /// Decode a saved response
    fn decode<W: Write>(&self, input: &str, kind: DecodeKind, out: &mut W) -> Result<()> {
        let xml = read_input(input)?;
        debug!("Decoding {} bytes from {} as {:?}", xml.len(), input, kind);

        let decoder = ResponseDecoder::new();
        let decoded = match kind {
            DecodeKind::Record => decoder
                .decode_as::<DecodedRecord>(&xml)
                .and_then(|record| Ok(serde_json::to_value(record)?)),
            DecodeKind::Mailing => decoder
                .decode_as::<Mailing>(&xml)
                .and_then(|mailing| Ok(serde_json::to_value(mailing)?)),
        };

        match decoded {
            Ok(value) => self.output_message(out, &value),
            Err(Error::Fault(fault)) => {
                self.output_message(
                    out,
                    &json!({
                        "fault": {
                            "code": fault.code(),
                            "error": fault.error(),
                            "description": fault.description(),
                        }
                    }),
                )?;
                Err(Error::Fault(fault))
            }
            Err(e) => Err(e),
        }
    }

    /// Print canonical names
    fn normalize<W: Write>(&self, labels: &[String], out: &mut W) -> Result<()> {
        for label in labels {
            writeln!(out, "{}", normalize_label(label))?;
        }
        Ok(())
    }

    /// Validate a config file
    fn check_config<W: Write>(&self, path: &Path, out: &mut W) -> Result<()> {
        let config = load_config(path)?;
        info!("Config '{}' is valid", path.display());

        self.output_message(
            out,
            &json!({
                "status": "valid",
                "username": config.username,
                "source": config.source,
                "wsdl_url": config.wsdl_url,
                "return_format": config.return_format,
            }),
        )
    }

    /// Output a message
    fn output_message<W: Write>(&self, out: &mut W, msg: &Value) -> Result<()> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(msg)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(msg)?,
        };
        writeln!(out, "{rendered}")?;
        Ok(())
    }
}

/// Read a response from a file, or stdin for `-`
fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read response from stdin")?;
        return Ok(buf);
    }

    fs::read_to_string(input)
        .map_err(|e| Error::invalid_file(format!("Failed to read response file '{input}': {e}")))
}
