use crate::error::{GeometryError, Result, TopologyError};
use crate::geometry::{Polygon, Vertex};
use crate::graph::Graph;
use crate::tessellation::{TessellatePolygon, TriangleMesh};

use super::{VisibilityOptions, VisibleVertices};

/// The region visible from a single viewpoint.
#[derive(Debug, Clone)]
pub struct IsovistPolygon {
    polygon: Polygon,
    origin: Vertex,
    includes_origin: bool,
}

impl IsovistPolygon {
    /// Ring vertices in angular order, with the origin last if it was appended.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        self.polygon.vertices()
    }

    #[must_use]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    #[must_use]
    pub fn origin(&self) -> &Vertex {
        &self.origin
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.polygon.area()
    }

    /// Returns `true` if the origin had to be added to close the ring.
    #[must_use]
    pub fn includes_origin(&self) -> bool {
        self.includes_origin
    }

    /// Triangulates the isovist.
    ///
    /// # Errors
    ///
    /// Returns an error if the triangulation fails.
    pub fn tessellate(&self) -> Result<TriangleMesh> {
        TessellatePolygon::new(&self.polygon).execute()
    }
}

/// Builds the isovist polygon for a viewpoint.
///
/// The visible vertices are joined in angular order. If that ring crosses
/// itself the origin is appended and the ring rebuilt, once.
#[derive(Debug)]
pub struct Isovist {
    origin: Vertex,
    options: VisibilityOptions,
}

impl Isovist {
    /// Creates a new `Isovist` query with default options.
    #[must_use]
    pub fn new(origin: Vertex) -> Self {
        Self {
            origin,
            options: VisibilityOptions::default(),
        }
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
    /// - Any error from [`VisibleVertices::execute`].
    /// - `GeometryError::Degenerate` if fewer than 3 vertices are visible or
    ///   they are collinear.
    /// - `TopologyError::SelfIntersecting` if the ring still crosses itself
    ///   after the origin is appended.
    pub fn execute(&self, graph: &Graph) -> Result<IsovistPolygon> {
        let eps = self.options.tolerance;
        let mut ring = VisibleVertices::new(self.origin)
            .with_options(self.options)
            .execute(graph)?;
        if ring.len() < 3 {
            return Err(GeometryError::Degenerate(format!(
                "isovist needs at least 3 visible vertices, got {}",
                ring.len()
            ))
            .into());
        }

        let polygon = Polygon::from_vertices(ring.clone())?;
        if polygon.is_simple(eps) {
            return Ok(IsovistPolygon {
                polygon,
                origin: self.origin,
                includes_origin: false,
            });
        }

        tracing::debug!(origin = %self.origin, "isovist ring crosses itself, appending origin");
        ring.push(self.origin);
        let polygon = Polygon::from_vertices(ring)?;
        if let Some((i, j)) = polygon.first_self_intersection(eps) {
            tracing::warn!(origin = %self.origin, i, j, "isovist ring still crosses itself");
            return Err(TopologyError::SelfIntersecting(format!(
                "isovist edges {i} and {j} meet after appending the origin"
            ))
            .into());
        }
        Ok(IsovistPolygon {
            polygon,
            origin: self.origin,
            includes_origin: true,
        })
    }
}
