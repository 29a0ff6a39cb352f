//! Map integrity checks run from a single start door.

use std::fmt::Write;

use serde::Serialize;
use tracing::debug;

use crate::graph::{FloorIndex, Graph};
use crate::path::explore;

/// A path segment the start door cannot reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnreachedSegment {
    pub floor: FloorIndex,
    pub index: usize,
}

/// Everything left unreached by one exploration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapReport {
    pub start: String,
    pub accessible: bool,
    pub unreached_segments: Vec<UnreachedSegment>,
    pub unreachable_doors: Vec<String>,
}

impl MapReport {
    /// `true` when every segment and door is reachable.
    pub fn is_clean(&self) -> bool {
        self.unreached_segments.is_empty() && self.unreachable_doors.is_empty()
    }

    pub fn render_plain_text(&self, graph: &Graph) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Map check from {}{}",
            self.start,
            if self.accessible { " (accessible)" } else { "" }
        );
        for segment in &self.unreached_segments {
            let _ = writeln!(
                buffer,
                "Unreachable path: floor {} segment {}",
                graph.floor_id(segment.floor),
                segment.index
            );
        }
        for door in &self.unreachable_doors {
            let _ = writeln!(buffer, "Unreachable door: {door}");
        }
        if self.is_clean() {
            let _ = writeln!(buffer, "All paths and doors reachable");
        }
        buffer
    }
}

/// Report every segment and door with no route from `start`.
pub fn check_map(graph: &Graph, start: &str, accessible: bool) -> MapReport {
    let reach = explore(graph, start, accessible);

    let unreached_segments: Vec<UnreachedSegment> = graph
        .floors()
        .iter()
        .flat_map(|floor| {
            reach
                .state()
                .floor_segments(floor.index)
                .iter()
                .enumerate()
                .filter(|(_, label)| !label.is_reached())
                .map(move |(index, _)| UnreachedSegment {
                    floor: floor.index,
                    index,
                })
        })
        .collect();

    let unreachable_doors: Vec<String> = graph
        .door_ids()
        .into_iter()
        .filter(|door| reach.distance_to(door).is_none())
        .collect();

    debug!(
        start = reach.start(),
        unreached_segments = unreached_segments.len(),
        unreachable_doors = unreachable_doors.len(),
        "map check complete"
    );

    MapReport {
        start: reach.start().to_string(),
        accessible,
        unreached_segments,
        unreachable_doors,
    }
}
