use rayon::prelude::*;
use slotmap::SecondaryMap;

use crate::error::Result;
use crate::geometry::Edge;
use crate::graph::{Graph, VertexId};

use super::{sight_line, VisibilityOptions};

/// Mutually visible vertex pairs of a [`Graph`].
#[derive(Debug, Clone, Default)]
pub struct VisibilityEdges {
    pairs: Vec<(VertexId, VertexId)>,
    edges: Vec<Edge>,
    neighbors: SecondaryMap<VertexId, Vec<VertexId>>,
}

impl VisibilityEdges {
    /// Visible pairs, each listed once.
    #[must_use]
    pub fn pairs(&self) -> &[(VertexId, VertexId)] {
        &self.pairs
    }

    /// The sight line for each pair, in the same order as [`Self::pairs`].
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Vertices visible from `id`.
    #[must_use]
    pub fn neighbors(&self, id: VertexId) -> &[VertexId] {
        self.neighbors.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns `true` if `a` and `b` see each other.
    #[must_use]
    pub fn contains(&self, a: VertexId, b: VertexId) -> bool {
        self.neighbors(a).contains(&b)
    }
}

/// Computes the visibility graph over every pair of graph vertices.
#[derive(Debug, Default)]
pub struct VisibilityGraph {
    options: VisibilityOptions,
}

impl VisibilityGraph {
    /// Creates a new `VisibilityGraph` query with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(mut self, options: VisibilityOptions) -> Self {
        self.options = options;
        self
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Currently infallible for a validated graph; the `Result` matches the
    /// other queries.
    pub fn execute(&self, graph: &Graph) -> Result<VisibilityEdges> {
        let eps = self.options.tolerance;
        let ids: Vec<VertexId> = graph.vertices().map(|(id, _)| id).collect();

        // Pairs (i, j) with i < j, gathered per source so the output order
        // follows the arena order regardless of scheduling.
        let from_source = |i: usize| -> Vec<(VertexId, VertexId, Edge)> {
            let a = ids[i];
            let Some(origin) = graph.vertex(a) else {
                return Vec::new();
            };
            ids[i + 1..]
                .iter()
                .filter_map(|&b| sight_line(graph, origin, Some(a), b, eps).map(|e| (a, b, e)))
                .collect()
        };
        let found: Vec<Vec<(VertexId, VertexId, Edge)>> = if self.options.parallel {
            (0..ids.len()).into_par_iter().map(from_source).collect()
        } else {
            (0..ids.len()).map(from_source).collect()
        };

        let mut result = VisibilityEdges::default();
        for &id in &ids {
            result.neighbors.insert(id, Vec::new());
        }
        for (a, b, edge) in found.into_iter().flatten() {
            result.pairs.push((a, b));
            result.edges.push(edge);
            if let Some(list) = result.neighbors.get_mut(a) {
                list.push(b);
            }
            if let Some(list) = result.neighbors.get_mut(b) {
                list.push(a);
            }
        }

        tracing::debug!(
            vertices = ids.len(),
            pairs = result.len(),
            "visibility graph"
        );
        Ok(result)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Vertex;
    use crate::math::{Point3, TOLERANCE};

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
    fn convex_boundary_is_complete() {
        let graph = Graph::build(&square(0.0, 0.0, 10.0), &[]).unwrap();
        let vis = VisibilityGraph::new().execute(&graph).unwrap();
        // K4: every pair of corners.
        assert_eq!(vis.len(), 6);
        for (id, _) in graph.vertices() {
            assert_eq!(vis.neighbors(id).len(), 3);
        }
        assert_eq!(vis.edges().len(), vis.pairs().len());
    }

    #[test]
    fn obstacle_diagonals_are_excluded() {
        let graph = Graph::build(&square(0.0, 0.0, 10.0), &[square(4.0, 4.0, 2.0)]).unwrap();
        let vis = VisibilityGraph::new().execute(&graph).unwrap();
        let a = id_of(&graph, 4.0, 4.0);
        let b = id_of(&graph, 6.0, 6.0);
        assert!(!vis.contains(a, b));
        assert!(!vis.contains(b, a));
        assert!(vis.contains(a, id_of(&graph, 6.0, 4.0)));
        // The corner diagonal runs through the obstacle.
        assert!(!vis.contains(id_of(&graph, 0.0, 0.0), id_of(&graph, 10.0, 10.0)));
        assert!(vis.contains(id_of(&graph, 0.0, 0.0), id_of(&graph, 10.0, 0.0)));
    }

    #[test]
    fn neighbors_are_symmetric() {
        let graph = Graph::build(
            &square(0.0, 0.0, 20.0),
            &[square(3.0, 3.0, 2.0), square(12.0, 5.0, 3.0)],
        )
        .unwrap();
        let vis = VisibilityGraph::new().execute(&graph).unwrap();
        for &(a, b) in vis.pairs() {
            assert!(vis.neighbors(a).contains(&b));
            assert!(vis.neighbors(b).contains(&a));
        }
    }

    #[test]
    fn serial_and_parallel_agree() {
        let graph = Graph::build(
            &square(0.0, 0.0, 20.0),
            &[square(3.0, 3.0, 2.0), square(12.0, 5.0, 3.0)],
        )
        .unwrap();
        let parallel = VisibilityGraph::new().execute(&graph).unwrap();
        let serial = VisibilityGraph::new()
            .with_options(VisibilityOptions {
                parallel: false,
                ..VisibilityOptions::default()
            })
            .execute(&graph)
            .unwrap();
        assert_eq!(parallel.pairs(), serial.pairs());
    }
}
