//! Check command handler for finding unreachable paths and doors.

use anyhow::Result;

use wayfinding_lib::{check_map, validate_door, Graph};

use wayfinding_cli::output::{emit, OutputFormat};

/// Handle the check subcommand.
///
/// An unclean report is still a successful run; only an unknown start door fails.
pub fn handle_check_command(
    graph: &Graph,
    from: &str,
    accessible: bool,
    format: OutputFormat,
) -> Result<()> {
    validate_door(graph, from)?;
    let report = check_map(graph, from, accessible);
    emit(format, &report, &report.render_plain_text(graph))
}
