//! Route command handler for computing walks between two doors.

use anyhow::{bail, Result};

use wayfinding_lib::{
    plan_route, validate_door, DrawingOptions, Graph, RouteOutcome, RouteRequest, RouteSummary,
};

use wayfinding_cli::output::{emit, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting door.
    pub from: String,
    /// Destination door.
    pub to: String,
    /// Avoid stairs and other inaccessible portals.
    pub accessible: bool,
    /// Corner rounding radius; `None` uses the library default.
    pub radius: Option<f64>,
    /// Skip geometry post-processing.
    pub no_drawing: bool,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        let request = RouteRequest::new(self.from.as_str(), self.to.as_str())
            .accessible(self.accessible);
        if self.no_drawing {
            return request.without_drawing();
        }
        match self.radius {
            Some(radius) => request.with_drawing(DrawingOptions::with_corner_radius(radius)),
            None => request,
        }
    }
}

/// Handle the route subcommand.
///
/// Both doors are validated first so that typos get suggestions instead of
/// an unreachable result.
pub fn handle_route_command(
    graph: &Graph,
    args: &RouteCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    if let Some(radius) = args.radius {
        if !radius.is_finite() || radius < 0.0 {
            bail!("--radius must be a non-negative number, got {radius}");
        }
    }
    validate_door(graph, &args.from)?;
    validate_door(graph, &args.to)?;

    let plan = plan_route(graph, &args.to_request());
    if plan.route.outcome == RouteOutcome::Unreachable {
        bail!(
            "no route found from {} to {}{}",
            plan.route.start,
            plan.route.goal,
            if args.accessible {
                " using accessible portals only"
            } else {
                ""
            }
        );
    }

    let summary = RouteSummary::from_plan(graph, &plan);
    emit(format, &summary, &summary.render_plain_text())
}
