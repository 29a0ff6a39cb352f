//! Output formatting shared by every subcommand.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON for scripts.
    Json,
}

/// Print `value` as JSON, or `text` when the format is plain text.
pub fn emit<T: Serialize>(format: OutputFormat, value: &T, text: &str) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print!("{text}"),
    }
    Ok(())
}
