//! Indoor wayfinding library entry points.
//!
//! This crate turns per-floor line geometry (walkable paths, doors and
//! inter-floor portals) into a routing graph, finds shortest routes between
//! doors, and post-processes a route into smoothed per-floor polylines.
//! Higher-level consumers (CLI, host UIs) should only depend on the functions
//! exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod builder;
pub mod diagnostics;
pub mod drawing;
pub mod error;
pub mod graph;
pub mod output;
pub mod path;
pub mod plan;
pub mod routing;
pub mod snapshot;
pub mod state;

pub use builder::{build_graph, build_graph_with_options, BuildOptions};
pub use diagnostics::{check_map, MapReport, UnreachedSegment};
pub use drawing::{
    draw_route, DrawCommand, DrawingOptions, FloorDrawing, DEFAULT_CORNER_RADIUS,
};
pub use error::{Error, Result};
pub use graph::{
    Floor, FloorIndex, Graph, GraphStats, PathSegment, Point, Portal, PortalEnd, PortalKind,
    PortalSide,
};
pub use output::{FloorSummary, RouteStepSummary, RouteSummary};
pub use path::{explore, find_route, Reachability, Route, RouteOutcome, RoutingEngine, Step};
pub use plan::{normalize_id, BuildingPlan, FloorPlan, LineRecord};
pub use routing::{plan_route, plan_route_with, validate_door, RoutePlan, RouteRequest};
pub use state::{Label, Predecessor, SearchState};
