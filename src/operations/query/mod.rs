mod isovist;
mod visibility_graph;
mod visible_vertices;

pub use isovist::{Isovist, IsovistPolygon};
pub use visibility_graph::{VisibilityEdges, VisibilityGraph};
pub use visible_vertices::VisibleVertices;

use std::cmp::Ordering;

use crate::geometry::{Edge, Vertex};
use crate::graph::{Graph, VertexId};
use crate::math::TOLERANCE;

/// Parameters shared by the visibility queries.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityOptions {
    /// Tolerance for every geometric predicate used by the query.
    pub tolerance: f64,
    /// Check candidates on the rayon thread pool.
    pub parallel: bool,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            tolerance: TOLERANCE,
            parallel: true,
        }
    }
}

/// Tests the sight line from `origin` to the graph vertex `target`.
///
/// Returns the sight line as an [`Edge`] if it is unobstructed. Edges incident
/// to `target`, to `origin_id`, or passing through `origin` never block. The
/// midpoint must lie in free space so chords across obstacle interiors and
/// outside a concave boundary are rejected.
pub(crate) fn sight_line(
    graph: &Graph,
    origin: &Vertex,
    origin_id: Option<VertexId>,
    target: VertexId,
    eps: f64,
) -> Option<Edge> {
    let to = graph.vertex(target)?;
    let line = Edge::new_with_tolerance(*origin, *to, eps).ok()?;

    let blocker = graph.edges().find(|(_, ge)| {
        if ge.is_incident_to(target)
            || origin_id.is_some_and(|id| ge.is_incident_to(id))
            || origin.on_edge_with_tolerance(&ge.edge, eps)
        {
            return false;
        }
        line.intersects_with_tolerance(&ge.edge, eps)
    });
    if let Some((id, ge)) = blocker {
        tracing::trace!(?id, target = %to, wall = %ge.edge, "sight line blocked");
        return None;
    }
    if !graph.in_free_space(&line.midpoint(), eps) {
        tracing::trace!(target = %to, "sight line leaves free space");
        return None;
    }
    Some(line)
}

/// Sorts vertices by angle around `origin` in the boundary plane.
///
/// Angles are quantized by `eps` so that near-equal angles tie; ties are
/// broken by `(Y, X, Z)` ascending.
pub(crate) fn sort_by_angle(graph: &Graph, origin: &Vertex, vertices: &mut [Vertex], eps: f64) {
    let frame = graph.boundary().frame();
    let center = frame.project(origin.point());
    let step = eps.max(f64::EPSILON);
    let angle_key = |v: &Vertex| {
        let uv = frame.project(v.point());
        quantize((uv.y - center.y).atan2(uv.x - center.x), step)
    };
    vertices.sort_by(|a, b| match angle_key(a).cmp(&angle_key(b)) {
        Ordering::Equal => a.cmp_yxz(b),
        other => other,
    });
}

#[allow(clippy::cast_possible_truncation)]
fn quantize(value: f64, step: f64) -> i64 {
    (value / step).round() as i64
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn square(x0: f64, y0: f64, size: f64) -> Vec<Point3> {
        vec![
            p(x0, y0),
            p(x0 + size, y0),
            p(x0 + size, y0 + size),
            p(x0, y0 + size),
        ]
    }

    fn id_of(graph: &Graph, x: f64, y: f64) -> VertexId {
        graph
            .find_vertex(&Vertex::new(x, y, 0.0), TOLERANCE)
            .unwrap()
    }

    #[test]
    fn default_options() {
        let opts = VisibilityOptions::default();
        assert_eq!(opts.tolerance, TOLERANCE);
        assert!(opts.parallel);
    }

    #[test]
    fn obstacle_blocks_sight_line() {
        let graph = Graph::build(&square(0.0, 0.0, 10.0), &[square(4.0, 4.0, 2.0)]).unwrap();
        let origin = Vertex::new(1.0, 5.0, 0.0);
        let visible = |x, y| sight_line(&graph, &origin, None, id_of(&graph, x, y), TOLERANCE);
        assert!(visible(0.0, 0.0).is_some());
        assert!(visible(10.0, 0.0).is_some());
        assert!(visible(10.0, 10.0).is_some());
        assert!(visible(4.0, 4.0).is_some());
        // Both cross the obstacle's left side.
        assert!(visible(6.0, 6.0).is_none());
        assert!(visible(6.0, 4.0).is_none());
    }

    #[test]
    fn obstacle_diagonal_is_not_free() {
        let graph = Graph::build(&square(0.0, 0.0, 10.0), &[square(4.0, 4.0, 2.0)]).unwrap();
        let from = Vertex::new(4.0, 4.0, 0.0);
        let from_id = id_of(&graph, 4.0, 4.0);
        let line = sight_line(&graph, &from, Some(from_id), id_of(&graph, 6.0, 6.0), TOLERANCE);
        assert!(line.is_none());
        // Along the obstacle's own side.
        let line = sight_line(&graph, &from, Some(from_id), id_of(&graph, 6.0, 4.0), TOLERANCE);
        assert!(line.is_some());
    }

    #[test]
    fn chord_outside_concave_boundary_is_not_free() {
        let u = vec![
            p(0.0, 0.0),
            p(10.0, 0.0),
            p(10.0, 10.0),
            p(7.0, 10.0),
            p(7.0, 3.0),
            p(3.0, 3.0),
            p(3.0, 10.0),
            p(0.0, 10.0),
        ];
        let graph = Graph::build(&u, &[]).unwrap();
        let from = Vertex::new(3.0, 10.0, 0.0);
        let from_id = id_of(&graph, 3.0, 10.0);
        assert!(sight_line(&graph, &from, Some(from_id), id_of(&graph, 7.0, 10.0), TOLERANCE).is_none());
    }

    #[test]
    fn angular_order_with_yxz_ties() {
        let graph = Graph::build(&square(0.0, 0.0, 10.0), &[]).unwrap();
        let origin = Vertex::new(5.0, 5.0, 0.0);
        let mut vs = vec![
            Vertex::new(0.0, 10.0, 0.0),
            Vertex::new(10.0, 10.0, 0.0),
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(10.0, 0.0, 0.0),
        ];
        sort_by_angle(&graph, &origin, &mut vs, TOLERANCE);
        assert_eq!(
            vs,
            vec![
                Vertex::new(0.0, 0.0, 0.0),
                Vertex::new(10.0, 0.0, 0.0),
                Vertex::new(10.0, 10.0, 0.0),
                Vertex::new(0.0, 10.0, 0.0),
            ]
        );

        // Same direction from the origin: nearer (lower Y) first.
        let mut vs = vec![Vertex::new(9.0, 9.0, 0.0), Vertex::new(7.0, 7.0, 0.0)];
        sort_by_angle(&graph, &origin, &mut vs, TOLERANCE);
        assert_eq!(vs[0], Vertex::new(7.0, 7.0, 0.0));
    }
}
