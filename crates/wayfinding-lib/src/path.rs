//! Label-correcting shortest-path search over segments and portals.
//!
//! Segments are the nodes: reaching a segment means having walked its whole
//! length, so a segment's distance already includes itself. Portals are
//! relaxed in-line and hand their distance straight to the segments on their
//! far end.

use serde::Serialize;
use tracing::{debug, warn};

use crate::graph::{FloorIndex, Graph};
use crate::plan::normalize_id;
use crate::state::{Label, Predecessor, SearchState};

/// One traversal in a computed route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Walk a path segment on `floor`.
    Segment { floor: FloorIndex, index: usize },
    /// Take a portal, arriving on `floor`.
    Portal { index: usize, floor: FloorIndex },
}

impl Step {
    /// Floor the traveller is on after taking this step.
    pub fn floor(&self) -> FloorIndex {
        match self {
            Step::Segment { floor, .. } | Step::Portal { floor, .. } => *floor,
        }
    }

    pub fn is_portal(&self) -> bool {
        matches!(self, Step::Portal { .. })
    }
}

/// Why a route has the steps it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteOutcome {
    Found,
    /// Start and goal are the same door; no search was run.
    SameDoor,
    /// No segment touching the goal was reached, or a door is unknown.
    Unreachable,
}

/// Result of a single routing query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub start: String,
    pub goal: String,
    pub accessible: bool,
    pub outcome: RouteOutcome,
    /// Total walked distance; infinite when unreachable, zero for the same door.
    pub length: f64,
    pub steps: Vec<Step>,
}

impl Route {
    fn empty(start: &str, goal: &str, accessible: bool, outcome: RouteOutcome) -> Self {
        Self {
            start: start.to_string(),
            goal: goal.to_string(),
            accessible,
            outcome,
            length: match outcome {
                RouteOutcome::SameDoor => 0.0,
                _ => f64::INFINITY,
            },
            steps: Vec::new(),
        }
    }

    pub fn is_found(&self) -> bool {
        self.outcome == RouteOutcome::Found
    }

    /// Number of portals traversed.
    pub fn floor_crossings(&self) -> usize {
        self.steps.iter().filter(|step| step.is_portal()).count()
    }
}

/// Find the shortest route between two doors with a private search state.
pub fn find_route(graph: &Graph, start: &str, goal: &str, accessible: bool) -> Route {
    RoutingEngine::new(graph).route(start, goal, accessible)
}

/// Explore everything reachable from `start` once, for repeated goal lookups.
pub fn explore<'g>(graph: &'g Graph, start: &str, accessible: bool) -> Reachability<'g> {
    let start = normalize_id(start).to_string();
    let mut state = SearchState::new(graph);
    relax_from_door(graph, &mut state, &start, accessible);
    Reachability {
        graph,
        start,
        accessible,
        state,
    }
}

/// Reusable router owning one search state for its graph.
///
/// Each call to [`RoutingEngine::route`] resets the state first, so a single
/// engine must not be shared between concurrent queries; clone the engine or
/// create one per thread instead.
#[derive(Debug, Clone)]
pub struct RoutingEngine<'g> {
    graph: &'g Graph,
    state: SearchState,
}

impl<'g> RoutingEngine<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            state: SearchState::new(graph),
        }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Labels left behind by the most recent query.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Compute the minimum-distance route from `start` to `goal`.
    ///
    /// With `accessible` set, portals that are not accessible are never taken.
    pub fn route(&mut self, start: &str, goal: &str, accessible: bool) -> Route {
        let (start, goal) = (normalize_id(start), normalize_id(goal));
        if start == goal {
            return Route::empty(start, goal, accessible, RouteOutcome::SameDoor);
        }

        self.state.reset();
        relax_from_door(self.graph, &mut self.state, start, accessible);
        let route = resolve_goal(self.graph, &self.state, start, goal, accessible);
        debug!(
            start,
            goal,
            accessible,
            outcome = ?route.outcome,
            steps = route.steps.len(),
            "route query complete"
        );
        route
    }
}

/// Labels from a single-source exploration.
#[derive(Debug, Clone)]
pub struct Reachability<'g> {
    graph: &'g Graph,
    start: String,
    accessible: bool,
    state: SearchState,
}

impl<'g> Reachability<'g> {
    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn accessible(&self) -> bool {
        self.accessible
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Route to `goal`; identical to [`find_route`] with the same start and flag.
    pub fn route_to(&self, goal: &str) -> Route {
        let goal = normalize_id(goal);
        if goal == self.start {
            return Route::empty(&self.start, goal, self.accessible, RouteOutcome::SameDoor);
        }
        resolve_goal(self.graph, &self.state, &self.start, goal, self.accessible)
    }

    /// Shortest distance to `goal`, if reachable.
    pub fn distance_to(&self, goal: &str) -> Option<f64> {
        let goal = normalize_id(goal);
        if goal == self.start {
            return Some(0.0);
        }
        best_goal_segment(self.graph, &self.state, goal).map(|(_, _, distance)| distance)
    }
}

/// Seed every segment touching `door` and relax until nothing improves.
fn relax_from_door(graph: &Graph, state: &mut SearchState, door: &str, accessible: bool) {
    let seeds = graph.door_segments(door);
    for &(floor, index) in &seeds {
        *state.segment_mut(floor, index) = Label {
            distance: graph.segment(floor, index).length,
            predecessor: Predecessor::Door,
        };
    }

    let mut worklist: Vec<(FloorIndex, usize)> = seeds.into_iter().rev().collect();
    let mut relaxations = 0usize;

    while let Some((floor, index)) = worklist.pop() {
        let reached = state.segment(floor, index).distance;
        let segment = graph.segment(floor, index);
        let came_from = Predecessor::Segment { floor, index };

        for &next in &segment.connections {
            let candidate = reached + graph.segment(floor, next).length;
            if candidate < state.segment(floor, next).distance {
                *state.segment_mut(floor, next) = Label {
                    distance: candidate,
                    predecessor: came_from,
                };
                worklist.push((floor, next));
                relaxations += 1;
            }
        }

        for &portal_index in &segment.portals {
            let portal = graph.portal(portal_index);
            if accessible && !portal.accessible {
                continue;
            }
            let through = reached + portal.length;
            if through >= state.portal(portal_index).distance {
                continue;
            }
            *state.portal_mut(portal_index) = Label {
                distance: through,
                predecessor: came_from,
            };

            let Some(side) = portal.side_touching(floor, index) else {
                continue;
            };
            let exit = portal.end(side.opposite());
            for &next in &exit.segments {
                let candidate = through + graph.segment(exit.floor, next).length;
                if candidate < state.segment(exit.floor, next).distance {
                    *state.segment_mut(exit.floor, next) = Label {
                        distance: candidate,
                        predecessor: Predecessor::Portal(portal_index),
                    };
                    worklist.push((exit.floor, next));
                    relaxations += 1;
                }
            }
        }
    }

    debug!(door, accessible, relaxations, "relaxation finished");
}

/// Cheapest segment touching `goal`; the first one found wins ties.
fn best_goal_segment(
    graph: &Graph,
    state: &SearchState,
    goal: &str,
) -> Option<(FloorIndex, usize, f64)> {
    let mut best: Option<(FloorIndex, usize, f64)> = None;
    for (floor, index) in graph.door_segments(goal) {
        let distance = state.segment(floor, index).distance;
        if distance < best.map_or(f64::INFINITY, |(_, _, d)| d) {
            best = Some((floor, index, distance));
        }
    }
    best
}

fn resolve_goal(
    graph: &Graph,
    state: &SearchState,
    start: &str,
    goal: &str,
    accessible: bool,
) -> Route {
    let Some((floor, index, length)) = best_goal_segment(graph, state, goal) else {
        return Route::empty(start, goal, accessible, RouteOutcome::Unreachable);
    };

    Route {
        start: start.to_string(),
        goal: goal.to_string(),
        accessible,
        outcome: RouteOutcome::Found,
        length,
        steps: backtrack(state, floor, index),
    }
}

/// Follow predecessors from the goal segment back to the start door.
fn backtrack(state: &SearchState, floor: FloorIndex, index: usize) -> Vec<Step> {
    let limit = state.len();
    let mut steps = Vec::new();
    let mut cursor = Some((floor, index));

    while let Some((floor, index)) = cursor {
        if steps.len() > limit {
            warn!("predecessor chain longer than the graph; truncating route");
            break;
        }
        steps.push(Step::Segment { floor, index });
        cursor = match state.segment(floor, index).predecessor {
            Predecessor::Segment { floor, index } => Some((floor, index)),
            Predecessor::Portal(portal) => {
                steps.push(Step::Portal {
                    index: portal,
                    floor,
                });
                match state.portal(portal).predecessor {
                    Predecessor::Segment { floor, index } => Some((floor, index)),
                    _ => None,
                }
            }
            Predecessor::Door | Predecessor::None => None,
        };
    }

    steps.reverse();
    steps
}
