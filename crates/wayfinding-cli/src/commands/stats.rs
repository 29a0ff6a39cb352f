//! Stats command handler for summarising a building graph.

use anyhow::Result;
use serde::Serialize;

use wayfinding_lib::{Graph, GraphStats};

use wayfinding_cli::output::{emit, OutputFormat};

/// Output structure for the stats command.
#[derive(Debug, Clone, Serialize)]
pub struct StatsOutput {
    pub default_floor: String,
    pub floor_ids: Vec<String>,
    #[serde(flatten)]
    pub stats: GraphStats,
}

impl StatsOutput {
    pub fn new(graph: &Graph) -> Self {
        Self {
            default_floor: graph.floor_id(graph.default_floor()).to_string(),
            floor_ids: graph.floors().iter().map(|floor| floor.id.clone()).collect(),
            stats: graph.stats(),
        }
    }

    fn render_text(&self) -> String {
        format!(
            "Floors: {} ({})\nDefault floor: {}\nSegments: {}\nDoors: {}\nPortals: {} ({} accessible)\n",
            self.stats.floors,
            self.floor_ids.join(", "),
            self.default_floor,
            self.stats.segments,
            self.stats.doors,
            self.stats.portals,
            self.stats.accessible_portals
        )
    }
}

/// Handle the stats subcommand.
pub fn handle_stats_command(graph: &Graph, format: OutputFormat) -> Result<()> {
    let output = StatsOutput::new(graph);
    emit(format, &output, &output.render_text())
}
