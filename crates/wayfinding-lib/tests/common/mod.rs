//! Common test utilities and fixture helpers.
//!
//! The two-floor fixture has a lobby on `floor1` with a short stair route and
//! a longer elevator route up to `R201` on `floor2`, an unmatched stair half,
//! and a `Storage` room that nothing connects to.

use std::path::PathBuf;

use wayfinding_lib::{build_graph, BuildingPlan, FloorPlan, Graph};

/// Path to fixtures directory shared with the CLI tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

#[allow(dead_code)]
pub fn fixture_plan() -> BuildingPlan {
    BuildingPlan::from_path(&fixtures_dir().join("two_floor_plan.json")).expect("fixture loads")
}

#[allow(dead_code)]
pub fn fixture_graph() -> Graph {
    build_graph(&fixture_plan()).expect("fixture builds")
}

/// Single-floor plan built from consecutive path points, door `A` at the
/// first point and door `B` at the last.
#[allow(dead_code)]
pub fn polyline_graph(points: &[(f64, f64)]) -> Graph {
    let first = points[0];
    let last = points[points.len() - 1];
    let floor = points
        .windows(2)
        .fold(FloorPlan::new("floor1"), |floor, pair| {
            floor.path(pair[0], pair[1])
        })
        .door("A", first, (first.0 - 1.0, first.1))
        .door("B", last, (last.0 + 1.0, last.1));
    build_graph(&BuildingPlan::new(vec![floor])).expect("polyline builds")
}

/// Two disconnected corridors on one floor joined by a same-floor door portal.
#[allow(dead_code)]
pub fn same_floor_portal_graph() -> Graph {
    let floor = FloorPlan::new("floor1")
        .path((0.0, 0.0), (10.0, 0.0))
        .path((50.0, 0.0), (60.0, 0.0))
        .door("A", (0.0, 0.0), (-1.0, 0.0))
        .door("B", (60.0, 0.0), (61.0, 0.0))
        .portal("Door.1.floor1_1_", (10.0, 0.0), (12.0, 0.0))
        .portal("Door.1.floor1_2_", (50.0, 0.0), (48.0, 0.0));
    build_graph(&BuildingPlan::new(vec![floor])).expect("same-floor plan builds")
}

#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
