use rayon::prelude::*;

use crate::error::{OperationError, Result, TopologyError};
use crate::geometry::Vertex;
use crate::graph::{Graph, VertexId};

use super::{sight_line, sort_by_angle, VisibilityOptions};

/// Finds the graph vertices visible from a viewpoint.
///
/// The result is ordered counter-clockwise by angle around the viewpoint in
/// the boundary plane, with ties broken by `(Y, X, Z)`.
#[derive(Debug)]
pub struct VisibleVertices {
    origin: Vertex,
    options: VisibilityOptions,
}

impl VisibleVertices {
    /// Creates a new `VisibleVertices` query with default options.
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
    /// - `OperationError::InvalidArgument` if the origin has non-finite
    ///   coordinates or lies beyond `MAX_COORDINATE`.
    /// - `TopologyError::OriginOutsideFreeSpace` if the origin is off the
    ///   boundary plane, outside the boundary or strictly inside an obstacle.
    pub fn execute(&self, graph: &Graph) -> Result<Vec<Vertex>> {
        let eps = self.options.tolerance;
        check_origin(graph, &self.origin, eps)?;

        let origin_id = graph.find_vertex(&self.origin, eps);
        let candidates: Vec<VertexId> = graph
            .vertices()
            .filter(|(id, _)| Some(*id) != origin_id)
            .map(|(id, _)| id)
            .collect();

        let test = |&id: &VertexId| {
            sight_line(graph, &self.origin, origin_id, id, eps).map(|line| *line.end())
        };
        let mut visible: Vec<Vertex> = if self.options.parallel {
            candidates.par_iter().filter_map(test).collect()
        } else {
            candidates.iter().filter_map(test).collect()
        };

        sort_by_angle(graph, &self.origin, &mut visible, eps);
        tracing::debug!(
            origin = %self.origin,
            candidates = candidates.len(),
            visible = visible.len(),
            "visible vertices"
        );
        Ok(visible)
    }
}

fn check_origin(graph: &Graph, origin: &Vertex, eps: f64) -> Result<()> {
    if !origin.is_finite() {
        return Err(OperationError::InvalidArgument(format!("non-finite origin {origin}")).into());
    }
    if !origin.is_in_range() {
        return Err(
            OperationError::InvalidArgument(format!("origin {origin} is out of range")).into(),
        );
    }
    if !graph.in_free_space(origin, eps) {
        return Err(TopologyError::OriginOutsideFreeSpace.into());
    }
    Ok(())
}
