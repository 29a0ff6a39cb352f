mod common;

use common::{assert_close, fixture_graph, polyline_graph, same_floor_portal_graph};
use wayfinding_lib::{
    draw_route, find_route, DrawCommand, DrawingOptions, FloorDrawing, Point, RouteOutcome,
};

fn sharp() -> DrawingOptions {
    DrawingOptions::with_corner_radius(0.0)
}

fn line_lengths(drawing: &FloorDrawing) -> Vec<f64> {
    drawing
        .commands
        .iter()
        .filter_map(DrawCommand::line_length)
        .collect()
}

#[test]
fn collinear_segments_merge_into_one_line() {
    let graph = polyline_graph(&[(0.0, 0.0), (5.0, 0.0), (8.0, 0.0), (10.0, 0.0)]);
    let route = find_route(&graph, "A", "B", false);
    let drawings = draw_route(&graph, &route, &sharp());

    assert_eq!(drawings.len(), 1);
    assert_eq!(
        drawings[0].commands,
        vec![
            DrawCommand::MoveTo {
                point: Point::new(0.0, 0.0)
            },
            DrawCommand::LineTo {
                point: Point::new(10.0, 0.0),
                length: 10.0
            },
        ]
    );
    assert_eq!(drawings[0].length, 10.0);
}

#[test]
fn corner_is_rounded_with_quadratic_curve() {
    let graph = polyline_graph(&[(0.0, 0.0), (20.0, 0.0), (20.0, 15.0)]);
    let route = find_route(&graph, "A", "B", false);
    let drawings = draw_route(&graph, &route, &DrawingOptions::with_corner_radius(10.0));
    let commands = &drawings[0].commands;

    assert_eq!(commands.len(), 4);
    assert_eq!(line_lengths(&drawings[0]), vec![10.0, 5.0]);
    assert_eq!(commands[1].point(), Point::new(10.0, 0.0));
    match commands[2] {
        DrawCommand::QuadraticCurveTo { control, point } => {
            assert_eq!(control, Point::new(20.0, 0.0));
            assert_close(point.x, 20.0);
            assert_close(point.y, 10.0);
        }
        other => panic!("expected a curve, got {other:?}"),
    }
    assert_eq!(commands[3].point(), Point::new(20.0, 15.0));
}

#[test]
fn zero_radius_keeps_corners_sharp() {
    let graph = polyline_graph(&[(0.0, 0.0), (20.0, 0.0), (20.0, 15.0)]);
    let route = find_route(&graph, "A", "B", false);
    let drawings = draw_route(&graph, &route, &sharp());

    assert_eq!(drawings[0].to_svg_path(), "M0,0L20,0L20,15");
}

#[test]
fn reversed_route_starts_at_far_endpoint() {
    let graph = polyline_graph(&[(0.0, 0.0), (20.0, 0.0), (20.0, 15.0)]);
    let route = find_route(&graph, "B", "A", false);
    let drawings = draw_route(&graph, &route, &sharp());

    assert_eq!(drawings[0].to_svg_path(), "M20,15L20,0L0,0");
    assert_eq!(line_lengths(&drawings[0]), vec![15.0, 20.0]);
}

#[test]
fn multi_floor_route_splits_at_portal() {
    let graph = fixture_graph();
    let route = find_route(&graph, "Lobby", "R201", false);
    let drawings = draw_route(&graph, &route, &sharp());

    let floors: Vec<usize> = drawings.iter().map(|drawing| drawing.floor).collect();
    assert_eq!(floors, vec![0, 1]);
    assert_eq!(drawings[0].to_svg_path(), "M0,0L30,0");
    assert_eq!(drawings[1].to_svg_path(), "M30,0L30,20");
    assert_eq!(drawings[0].length, 30.0);
    assert_eq!(drawings[1].length, 20.0);
}

#[test]
fn rounded_drawing_preserves_endpoints() {
    let graph = fixture_graph();
    let route = find_route(&graph, "Lobby", "R201", true);
    let drawings = draw_route(&graph, &route, &DrawingOptions::default());

    assert_eq!(drawings.len(), 2);
    let upper = &drawings[1];
    assert_eq!(upper.commands.first().map(DrawCommand::point), Some(Point::new(0.0, 10.0)));
    assert_eq!(upper.commands.last().map(DrawCommand::point), Some(Point::new(30.0, 20.0)));
    let curves = upper
        .commands
        .iter()
        .filter(|command| matches!(command, DrawCommand::QuadraticCurveTo { .. }))
        .count();
    assert_eq!(curves, 2);
    assert_eq!(upper.length, 80.0);
}

#[test]
fn same_floor_portal_starts_new_run_on_far_side() {
    let graph = same_floor_portal_graph();

    let forward = find_route(&graph, "A", "B", false);
    let drawings = draw_route(&graph, &forward, &sharp());
    assert_eq!(drawings.len(), 2);
    assert_eq!(drawings[0].to_svg_path(), "M0,0L10,0");
    assert_eq!(drawings[1].to_svg_path(), "M50,0L60,0");

    let backward = find_route(&graph, "B", "A", false);
    let drawings = draw_route(&graph, &backward, &sharp());
    assert_eq!(drawings[0].to_svg_path(), "M60,0L50,0");
    assert_eq!(drawings[1].to_svg_path(), "M10,0L0,0");
}

#[test]
fn empty_routes_draw_nothing() {
    let graph = fixture_graph();
    let unreachable = find_route(&graph, "Lobby", "Storage", false);
    let same = find_route(&graph, "Lobby", "Lobby", false);

    assert_eq!(unreachable.outcome, RouteOutcome::Unreachable);
    assert!(draw_route(&graph, &unreachable, &DrawingOptions::default()).is_empty());
    assert!(draw_route(&graph, &same, &DrawingOptions::default()).is_empty());
}

#[test]
fn route_from_another_graph_draws_nothing() {
    let building = fixture_graph();
    let route = find_route(&building, "Lobby", "R201", false);
    let corridor = polyline_graph(&[(0.0, 0.0), (10.0, 0.0)]);

    assert!(draw_route(&corridor, &route, &DrawingOptions::default()).is_empty());
}
