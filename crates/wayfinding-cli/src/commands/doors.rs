use anyhow::Result;

use wayfinding_lib::Graph;

use wayfinding_cli::output::{emit, OutputFormat};

/// Handle the doors subcommand: every door identifier, one per line.
pub fn handle_doors_command(graph: &Graph, format: OutputFormat) -> Result<()> {
    let doors = graph.door_ids();
    let text: String = doors.iter().map(|door| format!("{door}\n")).collect();
    emit(format, &doors, &text)
}
