use std::fmt::Write;

use serde::Serialize;

use crate::graph::{Graph, PortalKind};
use crate::path::{RouteOutcome, Step};
use crate::routing::RoutePlan;

/// Step of a route with floor indices resolved to floor identifiers.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouteStepSummary {
    Segment {
        index: usize,
        floor: String,
        segment: usize,
    },
    Portal {
        index: usize,
        portal: usize,
        kind: PortalKind,
        to_floor: String,
    },
}

/// Drawn part of a route on one floor.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FloorSummary {
    pub floor: String,
    pub length: f64,
    pub svg_path: String,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub start: String,
    pub goal: String,
    pub accessible: bool,
    pub outcome: RouteOutcome,
    /// `None` when the goal was not reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    pub floor_crossings: usize,
    pub steps: Vec<RouteStepSummary>,
    pub floors: Vec<FloorSummary>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with resolved floor identifiers.
    ///
    /// Floors and portals missing from `graph` render as `<unknown>` and
    /// [`PortalKind::Other`].
    pub fn from_plan(graph: &Graph, plan: &RoutePlan) -> Self {
        let route = &plan.route;

        let steps = route
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| match *step {
                Step::Segment { floor, index: segment } => RouteStepSummary::Segment {
                    index,
                    floor: graph.floor_id(floor).to_string(),
                    segment,
                },
                Step::Portal { index: portal, floor } => RouteStepSummary::Portal {
                    index,
                    portal,
                    kind: graph
                        .get_portal(portal)
                        .map_or(PortalKind::Other, |found| found.kind),
                    to_floor: graph.floor_id(floor).to_string(),
                },
            })
            .collect();

        let floors = plan
            .drawings
            .iter()
            .map(|drawing| FloorSummary {
                floor: graph.floor_id(drawing.floor).to_string(),
                length: drawing.length,
                svg_path: drawing.to_svg_path(),
            })
            .collect();

        Self {
            start: route.start.clone(),
            goal: route.goal.clone(),
            accessible: route.accessible,
            outcome: route.outcome,
            length: route.length.is_finite().then_some(route.length),
            floor_crossings: route.floor_crossings(),
            steps,
            floors,
        }
    }

    pub fn render_plain_text(&self) -> String {
        let mut buffer = String::new();
        let mode = if self.accessible { ", accessible" } else { "" };

        match self.outcome {
            RouteOutcome::SameDoor => {
                let _ = writeln!(buffer, "Route: {} is already the destination", self.start);
                return buffer;
            }
            RouteOutcome::Unreachable => {
                let _ = writeln!(
                    buffer,
                    "Route: no path from {} to {}{}",
                    self.start, self.goal, mode
                );
                return buffer;
            }
            RouteOutcome::Found => {}
        }

        let _ = writeln!(
            buffer,
            "Route: {} -> {} (length {:.2}, {} floor crossings{})",
            self.start,
            self.goal,
            self.length.unwrap_or_default(),
            self.floor_crossings,
            mode
        );

        for step in &self.steps {
            match step {
                RouteStepSummary::Segment {
                    index,
                    floor,
                    segment,
                } => {
                    let _ = writeln!(buffer, "{:>3}: walk {} segment {}", index, floor, segment);
                }
                RouteStepSummary::Portal {
                    index,
                    portal,
                    kind,
                    to_floor,
                } => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {} {} to {}",
                        index,
                        kind_label(*kind),
                        portal,
                        to_floor
                    );
                }
            }
        }

        for floor in &self.floors {
            let _ = writeln!(
                buffer,
                "{} ({:.2}): {}",
                floor.floor, floor.length, floor.svg_path
            );
        }

        buffer
    }
}

fn kind_label(kind: PortalKind) -> &'static str {
    match kind {
        PortalKind::Elevator => "elevator",
        PortalKind::Stair => "stair",
        PortalKind::Door => "door",
        PortalKind::Other => "portal",
    }
}
