mod common;

use common::{fixture_graph, fixture_plan, same_floor_portal_graph};
use wayfinding_lib::{
    build_graph, build_graph_with_options, BuildOptions, BuildingPlan, Error, FloorPlan, Graph,
    GraphStats, PortalKind,
};

#[test]
fn fixture_builds_expected_inventory() {
    let graph = fixture_graph();

    assert_eq!(
        graph.stats(),
        GraphStats {
            floors: 2,
            segments: 10,
            doors: 4,
            portals: 2,
            accessible_portals: 1,
        }
    );
    assert_eq!(graph.door_ids(), vec!["Lobby", "R101", "R201", "Storage"]);
    assert_eq!(graph.floor_id(0), "floor1");
    assert_eq!(graph.floor_index("floor2"), Some(1));
    assert_eq!(graph.default_floor(), 0);
}

#[test]
fn portal_halves_pair_across_floors() {
    let graph = fixture_graph();
    let stair = graph.portal(0);
    let elevator = graph.portal(1);

    assert_eq!(stair.kind, PortalKind::Stair);
    assert!(!stair.accessible);
    assert_eq!(stair.length, 4.0);
    assert_eq!((stair.a.floor, stair.b.floor), (0, 1));
    assert_eq!(stair.a.segments, vec![3]);
    assert_eq!(stair.b.segments, vec![0]);

    assert_eq!(elevator.kind, PortalKind::Elevator);
    assert!(elevator.accessible);
    assert_eq!(elevator.a.segments, vec![4]);
    assert_eq!(elevator.b.segments, vec![1]);

    assert_eq!(graph.segment(0, 3).portals, vec![0]);
    assert_eq!(graph.segment(1, 1).portals, vec![1]);
}

#[test]
fn unmatched_portal_half_is_dropped() {
    let graph = fixture_graph();
    assert!(graph
        .portals()
        .iter()
        .all(|portal| !portal.a.id.starts_with("Stair.9") && !portal.b.id.starts_with("Stair.9")));
    assert!(graph.segment(0, 0).portals.is_empty());
    assert!(graph.segment(0, 1).portals.is_empty());
}

#[test]
fn doors_attach_to_matching_endpoints() {
    let graph = fixture_graph();

    assert_eq!(graph.door_segments("Lobby"), vec![(0, 0), (0, 4)]);
    assert_eq!(graph.segment(0, 0).doors_a, vec!["Lobby"]);
    assert_eq!(graph.segment(0, 2).doors_b, vec!["R101"]);
    assert_eq!(graph.door_segments("R201"), vec![(1, 0), (1, 3)]);
    assert_eq!(graph.door_segments("R101_7_"), vec![(0, 2)]);
    assert!(graph.door_segments("Kitchen").is_empty());
}

#[test]
fn connections_are_symmetric() {
    let graph = fixture_graph();
    for floor in graph.floors() {
        for (index, segment) in graph.segments(floor.index).iter().enumerate() {
            for &other in &segment.connections {
                assert!(
                    graph.segment(floor.index, other).connections.contains(&index),
                    "{}:{index} -> {other} is one-way",
                    floor.id
                );
            }
        }
    }
    assert_eq!(graph.segment(0, 1).connections, vec![0, 2, 3]);
}

#[test]
fn same_floor_portal_keeps_sides_disjoint() {
    let graph = same_floor_portal_graph();
    let portal = graph.portal(0);

    assert!(portal.is_same_floor());
    assert_eq!(portal.kind, PortalKind::Door);
    assert_eq!(portal.a.segments, vec![0]);
    assert_eq!(portal.b.segments, vec![1]);
}

#[test]
fn door_suggestions_rank_close_names() {
    let graph = fixture_graph();
    let suggestions = graph.door_suggestions("R20", 3);
    assert_eq!(suggestions.first().map(String::as_str), Some("R201"));
    assert!(graph.door_suggestions("zzzzzz", 3).is_empty());
}

#[test]
fn empty_floor_set_is_rejected() {
    let err = build_graph(&BuildingPlan::new(Vec::new())).expect_err("no floors");
    assert!(matches!(err, Error::EmptyFloorSet));
}

#[test]
fn unknown_default_floor_is_rejected() {
    let options = BuildOptions {
        default_floor: Some("basement".to_string()),
    };
    let err = build_graph_with_options(&fixture_plan(), &options).expect_err("unknown floor");
    assert!(matches!(err, Error::UnknownDefaultFloor { id } if id == "basement"));
}

#[test]
fn requested_default_floor_is_resolved() {
    let mut plan = fixture_plan();
    plan.default_floor = Some("floor2".to_string());
    let graph = build_graph(&plan).expect("builds");
    assert_eq!(graph.default_floor(), 1);
}

#[test]
fn ambiguous_portal_is_rejected_in_any_floor_order() {
    let floor1 = FloorPlan::new("floor1")
        .path((0.0, 0.0), (10.0, 0.0))
        .portal("Elev.1.floor2", (10.0, 0.0), (12.0, 0.0));
    let floor2 = FloorPlan::new("floor2")
        .path((0.0, 0.0), (10.0, 0.0))
        .portal("Elev.1.floor1_1_", (10.0, 0.0), (12.0, 0.0))
        .portal("Elev.1.floor1_2_", (0.0, 0.0), (-2.0, 0.0));

    for floors in [
        vec![floor1.clone(), floor2.clone()],
        vec![floor2.clone(), floor1.clone()],
    ] {
        let err = build_graph(&BuildingPlan::new(floors)).expect_err("ambiguous");
        assert!(matches!(
            err,
            Error::AmbiguousPortal { ref id, ref floor, candidates: 2 }
                if id == "Elev.1.floor2" && floor == "floor1"
        ));
    }
}

#[test]
fn non_finite_coordinates_are_rejected() {
    let floor = FloorPlan::new("floor1").path((0.0, 0.0), (f64::INFINITY, 0.0));
    let err = build_graph(&BuildingPlan::new(vec![floor])).expect_err("non-finite");
    assert!(matches!(err, Error::NonFiniteCoordinate { .. }));
}

#[test]
fn duplicate_floor_ids_are_renumbered() {
    let floor_a = FloorPlan::new("level")
        .path((0.0, 0.0), (10.0, 0.0))
        .door("A", (0.0, 0.0), (-1.0, 0.0));
    let floor_b = FloorPlan::new("level")
        .path((10.0, 0.0), (10.0, 10.0))
        .door("B", (10.0, 10.0), (10.0, 11.0));

    let graph = build_graph(&BuildingPlan::new(vec![floor_a, floor_b])).expect("builds");
    let ids: Vec<&str> = graph.floors().iter().map(|floor| floor.id.as_str()).collect();
    assert_eq!(ids, vec!["floor_0", "floor_1"]);
    assert_eq!(graph.door_segments("B"), vec![(1, 0)]);
}

#[test]
fn graph_survives_json_round_trip() {
    let graph = fixture_graph();
    let json = serde_json::to_string(&graph).expect("serializes");
    let restored: Graph = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(restored, graph);
}
