//! Snapshot command handler for writing a prebuilt binary graph.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use wayfinding_lib::Graph;

use wayfinding_cli::output::{emit, OutputFormat};

/// Output structure for the snapshot command.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotOutput {
    pub path: String,
    pub floors: usize,
    pub segments: usize,
    pub portals: usize,
}

/// Handle the snapshot subcommand.
pub fn handle_snapshot_command(graph: &Graph, output: &Path, format: OutputFormat) -> Result<()> {
    graph
        .save_snapshot(output)
        .with_context(|| format!("failed to write snapshot to {}", output.display()))?;
    info!(path = %output.display(), "snapshot written");

    let stats = graph.stats();
    let result = SnapshotOutput {
        path: output.display().to_string(),
        floors: stats.floors,
        segments: stats.segments,
        portals: stats.portals,
    };
    let text = format!("Snapshot written to {}\n", result.path);
    emit(format, &result, &text)
}
