//! Turn a routed step list into one smoothed polyline per floor.
//!
//! The route is split at each portal. Each run starts with a move to the
//! entry point on its floor and follows segment far ends from there. Runs are
//! then simplified by merging collinear points and rounding corners with
//! quadratic curves.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::graph::{FloorIndex, Graph, Point, PortalSide};
use crate::path::{Route, Step};

/// Corner radius used when the caller does not pick one.
pub const DEFAULT_CORNER_RADIUS: f64 = 8.0;

/// Geometry post-processing settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawingOptions {
    /// Distance cut from each side of a corner; `0` keeps corners sharp.
    pub corner_radius: f64,
}

impl Default for DrawingOptions {
    fn default() -> Self {
        Self {
            corner_radius: DEFAULT_CORNER_RADIUS,
        }
    }
}

impl DrawingOptions {
    pub fn with_corner_radius(corner_radius: f64) -> Self {
        Self { corner_radius }
    }
}

/// Single pen instruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawCommand {
    MoveTo { point: Point },
    LineTo { point: Point, length: f64 },
    QuadraticCurveTo { control: Point, point: Point },
}

impl DrawCommand {
    /// Where the pen rests after this command.
    pub fn point(&self) -> Point {
        match self {
            DrawCommand::MoveTo { point }
            | DrawCommand::LineTo { point, .. }
            | DrawCommand::QuadraticCurveTo { point, .. } => *point,
        }
    }

    /// Straight length drawn by a line; `None` for moves and curves.
    pub fn line_length(&self) -> Option<f64> {
        match self {
            DrawCommand::LineTo { length, .. } => Some(*length),
            _ => None,
        }
    }
}

/// Route polyline on one floor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorDrawing {
    pub floor: FloorIndex,
    pub commands: Vec<DrawCommand>,
    /// Walked distance on this floor, summed from the raw segments.
    pub length: f64,
}

impl FloorDrawing {
    fn start(floor: FloorIndex, point: Point) -> Self {
        Self {
            floor,
            commands: vec![DrawCommand::MoveTo { point }],
            length: 0.0,
        }
    }

    fn pen(&self) -> Point {
        self.commands
            .last()
            .map(DrawCommand::point)
            .unwrap_or(Point::new(0.0, 0.0))
    }

    fn line_to(&mut self, point: Point, length: f64) {
        self.commands.push(DrawCommand::LineTo { point, length });
        self.length += length;
    }

    /// SVG path data for this floor, e.g. `M0,0L10,0Q20,0 20,10L20,15`.
    pub fn to_svg_path(&self) -> String {
        let mut data = String::new();
        for command in &self.commands {
            let _ = match command {
                DrawCommand::MoveTo { point } => write!(data, "M{},{}", point.x, point.y),
                DrawCommand::LineTo { point, .. } => write!(data, "L{},{}", point.x, point.y),
                DrawCommand::QuadraticCurveTo { control, point } => write!(
                    data,
                    "Q{},{} {},{}",
                    control.x, control.y, point.x, point.y
                ),
            };
        }
        data
    }
}

/// Build the per-floor drawings for `route`. Empty routes draw nothing.
///
/// `route` must come from `graph`; a step naming a segment or portal the
/// graph does not have leaves the whole route undrawn.
pub fn draw_route(graph: &Graph, route: &Route, options: &DrawingOptions) -> Vec<FloorDrawing> {
    let Some(mut drawings) = trace_runs(graph, route) else {
        warn!(
            start = %route.start,
            goal = %route.goal,
            "route refers to elements missing from the graph; nothing drawn"
        );
        return Vec::new();
    };
    for drawing in &mut drawings {
        merge_collinear(&mut drawing.commands);
        if options.corner_radius > 0.0 {
            round_corners(&mut drawing.commands, options.corner_radius);
        }
    }
    drawings
}

/// Split the steps into per-floor runs of raw straight lines.
fn trace_runs(graph: &Graph, route: &Route) -> Option<Vec<FloorDrawing>> {
    let mut steps = route.steps.iter();
    let Some(Step::Segment { floor, index }) = steps.next().copied() else {
        return Some(Vec::new());
    };

    let first = graph.get_segment(floor, index)?;
    let entry = if !first.doors_a.iter().any(|door| door == &route.start)
        && first.doors_b.iter().any(|door| door == &route.start)
    {
        first.b
    } else {
        first.a
    };

    let mut current = FloorDrawing::start(floor, entry);
    current.line_to(first.far_end(&entry), first.length);
    let mut drawings = Vec::new();

    for step in steps {
        match *step {
            Step::Segment { floor, index } => {
                let segment = graph.get_segment(floor, index)?;
                current.line_to(segment.far_end(&current.pen()), segment.length);
            }
            Step::Portal { index, floor } => {
                let portal = graph.get_portal(index)?;
                let side = if portal.is_same_floor() {
                    if portal.a.point == current.pen() {
                        PortalSide::B
                    } else {
                        PortalSide::A
                    }
                } else if portal.a.floor == floor {
                    PortalSide::A
                } else {
                    PortalSide::B
                };
                let next = FloorDrawing::start(floor, portal.end(side).point);
                drawings.push(std::mem::replace(&mut current, next));
            }
        }
    }

    drawings.push(current);
    Some(drawings)
}

/// Whether two direction vectors lie on the same line.
fn parallel(a: (f64, f64), b: (f64, f64)) -> bool {
    let ((adx, ady), (bdx, bdy)) = (a, b);
    if (ady == 0.0 && bdy == 0.0) || (adx == 0.0 && bdx == 0.0) {
        return true;
    }
    if ady == 0.0 || bdy == 0.0 {
        return false;
    }
    adx / ady == bdx / bdy
}

/// Drop interior points that sit on a straight line, folding their length forward.
pub(crate) fn merge_collinear(commands: &mut Vec<DrawCommand>) {
    let mut i = 1;
    while i + 1 < commands.len() {
        let (DrawCommand::LineTo { point: here, length: dropped }, DrawCommand::LineTo { .. }) =
            (commands[i], commands[i + 1])
        else {
            i += 1;
            continue;
        };

        let before = commands[i - 1].point();
        let after = commands[i + 1].point();
        let incoming = (before.x - here.x, before.y - here.y);
        let outgoing = (here.x - after.x, here.y - after.y);

        if parallel(incoming, outgoing) {
            commands.remove(i);
            if let DrawCommand::LineTo { length, .. } = &mut commands[i] {
                *length += dropped;
            }
            i = 1;
        } else {
            i += 1;
        }
    }
}

/// Replace corners between two lines longer than `radius` with a quadratic curve.
pub(crate) fn round_corners(commands: &mut Vec<DrawCommand>, radius: f64) {
    let mut i = 1;
    while i + 1 < commands.len() {
        let (
            DrawCommand::LineTo {
                point: corner,
                length: incoming,
            },
            DrawCommand::LineTo {
                point: next,
                length: outgoing,
            },
        ) = (commands[i], commands[i + 1])
        else {
            i += 1;
            continue;
        };

        if incoming <= radius || outgoing <= radius {
            i += 1;
            continue;
        }

        let before = commands[i - 1].point();
        commands[i] = DrawCommand::LineTo {
            point: before.towards(&corner, (incoming - radius) / incoming),
            length: incoming - radius,
        };
        commands[i + 1] = DrawCommand::LineTo {
            point: next,
            length: outgoing - radius,
        };
        commands.insert(
            i + 1,
            DrawCommand::QuadraticCurveTo {
                control: corner,
                point: corner.towards(&next, radius / outgoing),
            },
        );
        i += 2;
    }
}
