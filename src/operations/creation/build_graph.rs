use crate::error::{GeometryError, Result, TopologyError};
use crate::geometry::{Containment, Edge, Intersection, Polygon};
use crate::graph::Graph;
use crate::math::{Point3, TOLERANCE};

/// Builds a [`Graph`] from a boundary ring and obstacle rings.
///
/// Every ring is validated before any vertex is inserted, so a failed build
/// never yields a partial graph.
#[derive(Debug)]
pub struct BuildGraph {
    boundary: Vec<Point3>,
    obstacles: Vec<Vec<Point3>>,
    tolerance: f64,
}

impl BuildGraph {
    /// Creates a new `BuildGraph` operation.
    #[must_use]
    pub fn new(boundary: Vec<Point3>, obstacles: Vec<Vec<Point3>>) -> Self {
        Self {
            boundary,
            obstacles,
            tolerance: TOLERANCE,
        }
    }

    /// Sets the tolerance used when validating ring placement.
    ///
    /// It applies to the simplicity, planarity, containment and disjointness
    /// checks. Ring construction and vertex de-duplication in the graph always
    /// snap at [`TOLERANCE`], which keeps vertex equality and hashing
    /// consistent.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidArgument` for an empty ring or non-finite coordinates.
    /// - `GeometryError` for zero-length segments, rings with fewer than 3
    ///   distinct vertices, and obstacle vertices that coincide with vertices of
    ///   another ring.
    /// - `TopologyError` for non-planar input, self-intersecting rings,
    ///   obstacles outside the boundary and overlapping obstacles.
    pub fn execute(&self) -> Result<Graph> {
        let eps = self.tolerance;
        let boundary = Polygon::new(&self.boundary)?;
        let obstacles = self
            .obstacles
            .iter()
            .map(|ring| Polygon::new(ring))
            .collect::<Result<Vec<_>>>()?;

        check_simple(&boundary, "boundary", eps)?;
        for (i, obstacle) in obstacles.iter().enumerate() {
            check_coplanar(&boundary, obstacle, i, eps)?;
            check_simple(obstacle, &format!("obstacle {i}"), eps)?;
            check_contained(&boundary, obstacle, i, eps)?;
        }
        for i in 0..obstacles.len() {
            for j in (i + 1)..obstacles.len() {
                check_disjoint(&obstacles[i], &obstacles[j], (i, j), eps)?;
            }
        }

        let graph = Graph::from_polygons(boundary, obstacles);
        tracing::debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            obstacles = graph.obstacles().len(),
            "built polygon graph"
        );
        Ok(graph)
    }
}

fn check_simple(polygon: &Polygon, name: &str, eps: f64) -> Result<()> {
    match polygon.first_self_intersection(eps) {
        Some((i, j)) => Err(TopologyError::SelfIntersecting(format!(
            "{name} edges {i} and {j} meet"
        ))
        .into()),
        None => Ok(()),
    }
}

fn check_coplanar(boundary: &Polygon, obstacle: &Polygon, index: usize, eps: f64) -> Result<()> {
    if obstacle
        .vertices()
        .iter()
        .all(|v| boundary.is_in_plane(v, eps))
    {
        Ok(())
    } else {
        Err(TopologyError::NonPlanar(format!("obstacle {index} is off the boundary plane")).into())
    }
}

fn check_contained(boundary: &Polygon, obstacle: &Polygon, index: usize, eps: f64) -> Result<()> {
    for v in obstacle.vertices() {
        if boundary.vertices().iter().any(|b| b.almost_eq(v, eps)) {
            return Err(GeometryError::Degenerate(format!(
                "obstacle {index} vertex {v} coincides with a boundary vertex"
            ))
            .into());
        }
        if boundary.classify(v, eps) == Containment::Outside {
            return Err(TopologyError::NotContained(format!(
                "obstacle {index} vertex {v} lies outside"
            ))
            .into());
        }
    }
    for e in obstacle.edges() {
        if boundary.classify(&e.midpoint(), eps) == Containment::Outside
            || boundary.edges().iter().any(|b| crosses(e, b, eps))
        {
            return Err(TopologyError::NotContained(format!(
                "obstacle {index} edge {e} leaves the boundary"
            ))
            .into());
        }
    }
    Ok(())
}

fn check_disjoint(a: &Polygon, b: &Polygon, (i, j): (usize, usize), eps: f64) -> Result<()> {
    for va in a.vertices() {
        if b.vertices().iter().any(|vb| vb.almost_eq(va, eps)) {
            return Err(GeometryError::Degenerate(format!(
                "obstacles {i} and {j} share vertex {va}"
            ))
            .into());
        }
    }
    let inside = |p: &Polygon, q: &Polygon| {
        q.vertices()
            .iter()
            .copied()
            .chain(q.edges().iter().map(Edge::midpoint))
            .any(|v| p.classify(&v, eps) == Containment::Inside)
    };
    let crossing = a
        .edges()
        .iter()
        .any(|ea| b.edges().iter().any(|eb| crosses(ea, eb, eps)));
    if crossing || inside(a, b) || inside(b, a) {
        return Err(TopologyError::Overlapping(format!("obstacles {i} and {j}")).into());
    }
    Ok(())
}

/// Returns `true` if the edges cross at a point that is not an endpoint of
/// either edge.
fn crosses(a: &Edge, b: &Edge, eps: f64) -> bool {
    match a.intersection_with_tolerance(b, eps) {
        Some(Intersection::Point(p)) => {
            !a.contains_with_tolerance(&p, eps) && !b.contains_with_tolerance(&p, eps)
        }
        _ => false,
    }
}
