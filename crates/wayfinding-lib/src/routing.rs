use serde::Serialize;

use crate::drawing::{draw_route, DrawingOptions, FloorDrawing};
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::path::{Route, RoutingEngine};
use crate::plan::normalize_id;

/// Number of suggestions offered for an unknown door.
const MAX_SUGGESTIONS: usize = 3;

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    /// Only take elevators and same-level doors between floors.
    pub accessible: bool,
    /// Geometry post-processing; `None` skips drawing entirely.
    pub drawing: Option<DrawingOptions>,
}

impl RouteRequest {
    /// Unrestricted route with default drawing options.
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            accessible: false,
            drawing: Some(DrawingOptions::default()),
        }
    }

    pub fn accessible(mut self, accessible: bool) -> Self {
        self.accessible = accessible;
        self
    }

    pub fn with_drawing(mut self, options: DrawingOptions) -> Self {
        self.drawing = Some(options);
        self
    }

    pub fn without_drawing(mut self) -> Self {
        self.drawing = None;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub route: Route,
    /// One entry per floor crossed; empty when drawing was not requested.
    pub drawings: Vec<FloorDrawing>,
}

impl RoutePlan {
    pub fn is_found(&self) -> bool {
        self.route.is_found()
    }

    pub fn length(&self) -> f64 {
        self.route.length
    }

    /// Number of portals traversed.
    pub fn floor_crossings(&self) -> usize {
        self.route.floor_crossings()
    }
}

/// Compute a route and, if requested, its per-floor drawings.
///
/// An unreachable goal or unknown door yields an empty plan rather than an
/// error; use [`validate_door`] first when those cases must be told apart.
pub fn plan_route(graph: &Graph, request: &RouteRequest) -> RoutePlan {
    plan_route_with(&mut RoutingEngine::new(graph), request)
}

/// Same as [`plan_route`], reusing an existing engine's search state.
pub fn plan_route_with(engine: &mut RoutingEngine<'_>, request: &RouteRequest) -> RoutePlan {
    let route = engine.route(&request.start, &request.goal, request.accessible);
    let drawings = request
        .drawing
        .map(|options| draw_route(engine.graph(), &route, &options))
        .unwrap_or_default();
    RoutePlan { route, drawings }
}

/// Fail with suggestions when `door` is not attached to any segment.
pub fn validate_door(graph: &Graph, door: &str) -> Result<()> {
    if graph.has_door(door) {
        return Ok(());
    }
    let name = normalize_id(door);
    Err(Error::UnknownDoor {
        name: name.to_string(),
        suggestions: graph.door_suggestions(name, MAX_SUGGESTIONS),
    })
}
