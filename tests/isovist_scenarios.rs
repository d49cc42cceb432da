#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use sightline::geometry::{Edge, Intersection, Vertex};
use sightline::graph::Graph;
use sightline::math::Point3;
use sightline::operations::query::{Isovist, VisibilityGraph, VisibleVertices};
use sightline::ErrorKind;

/// Installs a subscriber once so `RUST_LOG=sightline=trace` shows query logs.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn p(x: f64, y: f64) -> Point3 {
    Point3::new(x, y, 0.0)
}

fn v(x: f64, y: f64) -> Vertex {
    Vertex::new(x, y, 0.0)
}

fn square(x0: f64, y0: f64, size: f64) -> Vec<Point3> {
    vec![
        p(x0, y0),
        p(x0 + size, y0),
        p(x0 + size, y0 + size),
        p(x0, y0 + size),
    ]
}

#[test]
fn crossing_edges_meet_at_a_point() {
    let a = Edge::new(v(0.0, 0.0), v(10.0, 0.0)).unwrap();
    let b = Edge::new(v(5.0, -5.0), v(5.0, 5.0)).unwrap();
    assert_eq!(a.intersection(&b), Some(Intersection::Point(v(5.0, 0.0))));
}

#[test]
fn disjoint_collinear_edges_do_not_meet() {
    let a = Edge::new(v(0.0, 0.0), v(10.0, 0.0)).unwrap();
    let b = Edge::new(v(20.0, 0.0), v(30.0, 0.0)).unwrap();
    assert_eq!(a.intersection(&b), None);
    assert!(!a.intersects(&b));
}

#[test]
fn empty_square_isovist() {
    init_tracing();
    let graph = Graph::build(&square(0.0, 0.0, 10.0), &[]).unwrap();
    let visible = VisibleVertices::new(v(5.0, 5.0)).execute(&graph).unwrap();
    assert_eq!(visible.len(), 4);

    let iso = Isovist::new(v(5.0, 5.0)).execute(&graph).unwrap();
    assert_relative_eq!(iso.area(), 100.0, epsilon = 1e-9);
}

#[test]
fn origin_inside_obstacle_is_unsupported() {
    init_tracing();
    let graph = Graph::build(&square(0.0, 0.0, 10.0), &[square(4.0, 4.0, 2.0)]).unwrap();
    let err = Isovist::new(v(5.0, 5.0)).execute(&graph).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedTopology);
}

#[test]
fn closing_point_is_ignored() {
    let mut ring = square(0.0, 0.0, 10.0);
    ring.push(p(0.0, 0.0));
    let graph = Graph::build(&ring, &[]).unwrap();
    assert_eq!(graph.vertex_count(), 4);
}

#[test]
fn invalid_input_kinds() {
    assert_eq!(
        Graph::build(&[], &[]).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    assert_eq!(
        Graph::build(&square(0.0, 0.0, 10.0), &[vec![p(1.0, 1.0), p(2.0, 1.0)]])
            .unwrap_err()
            .kind(),
        ErrorKind::DegenerateGeometry
    );
}

#[test]
fn removing_an_obstacle_never_hides_a_vertex() {
    init_tracing();
    let boundary = square(0.0, 0.0, 30.0);
    let kept = square(5.0, 20.0, 3.0);
    let removed = [square(12.0, 12.0, 4.0), square(20.0, 4.0, 3.0)];
    let with_all = Graph::build(
        &boundary,
        &[kept.clone(), removed[0].clone(), removed[1].clone()],
    )
    .unwrap();
    let with_fewer = Graph::build(&boundary, &[kept]).unwrap();

    for origin in [v(2.0, 2.0), v(25.0, 25.0), v(10.0, 5.0), v(0.0, 15.0)] {
        let before = VisibleVertices::new(origin).execute(&with_all).unwrap();
        let after = VisibleVertices::new(origin).execute(&with_fewer).unwrap();
        for vertex in before.iter().filter(|x| with_fewer.find_vertex(x, 1e-9).is_some()) {
            assert!(after.contains(vertex), "{vertex} hidden after removal from {origin}");
        }
    }
}

#[test]
fn isovist_area_is_bounded_by_boundary() {
    init_tracing();
    let boundary = vec![
        p(0.0, 0.0),
        p(20.0, 0.0),
        p(20.0, 20.0),
        p(12.0, 20.0),
        p(12.0, 8.0),
        p(8.0, 8.0),
        p(8.0, 20.0),
        p(0.0, 20.0),
    ];
    let graph = Graph::build(&boundary, &[square(15.0, 2.0, 2.0)]).unwrap();
    let boundary_area = graph.boundary().area();
    for origin in [v(4.0, 4.0), v(10.0, 4.0), v(4.0, 16.0), v(18.0, 12.0)] {
        match Isovist::new(origin).execute(&graph) {
            Ok(iso) => assert!(iso.area() <= boundary_area + 1e-9),
            Err(err) => assert_eq!(err.kind(), ErrorKind::UnsupportedTopology),
        }
    }
}

#[test]
fn queries_are_deterministic() {
    let graph = Graph::build(
        &square(0.0, 0.0, 40.0),
        &[square(5.0, 5.0, 4.0), square(20.0, 10.0, 5.0), square(10.0, 25.0, 3.0)],
    )
    .unwrap();
    let origin = v(18.0, 22.0);
    let first = VisibleVertices::new(origin).execute(&graph).unwrap();
    for _ in 0..5 {
        assert_eq!(VisibleVertices::new(origin).execute(&graph).unwrap(), first);
    }
    let pairs = VisibilityGraph::new().execute(&graph).unwrap();
    assert_eq!(VisibilityGraph::new().execute(&graph).unwrap().pairs(), pairs.pairs());
}

#[test]
fn visibility_graph_agrees_with_single_queries() {
    let graph = Graph::build(&square(0.0, 0.0, 20.0), &[square(8.0, 8.0, 4.0)]).unwrap();
    let all = VisibilityGraph::new().execute(&graph).unwrap();
    for (id, vertex) in graph.vertices() {
        let single = VisibleVertices::new(*vertex).execute(&graph).unwrap();
        assert_eq!(single.len(), all.neighbors(id).len(), "mismatch at {vertex}");
        for n in all.neighbors(id) {
            assert!(single.contains(graph.vertex(*n).unwrap()));
        }
    }
}
