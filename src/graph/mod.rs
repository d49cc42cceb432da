use std::collections::HashMap;

use slotmap::{SecondaryMap, SlotMap};

use crate::error::Result;
use crate::geometry::{Containment, Edge, Polygon, Vertex, VertexKey};
use crate::math::{Point3, TOLERANCE};
use crate::operations::creation::BuildGraph;
use crate::tessellation::{TessellatePolygon, TriangleMesh};

slotmap::new_key_type! {
    /// Unique identifier for a vertex in a [`Graph`].
    pub struct VertexId;
}

slotmap::new_key_type! {
    /// Unique identifier for an edge in a [`Graph`].
    pub struct EdgeId;
}

/// The ring a graph edge was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ring {
    /// The outer boundary.
    Boundary,
    /// The obstacle at this index.
    Obstacle(usize),
}

/// An edge of the input polygons, linked to its endpoint vertices.
#[derive(Debug, Clone)]
pub struct GraphEdge {
    /// Start vertex of the edge.
    pub start: VertexId,
    /// End vertex of the edge.
    pub end: VertexId,
    /// The segment geometry.
    pub edge: Edge,
    /// Which ring the edge belongs to.
    pub ring: Ring,
}

impl GraphEdge {
    /// Returns `true` if `id` is one of the edge's endpoints.
    #[must_use]
    pub fn is_incident_to(&self, id: VertexId) -> bool {
        self.start == id || self.end == id
    }
}

/// Vertices and edges of one boundary polygon and its obstacles.
///
/// Vertices live in a generational arena and are de-duplicated under
/// tolerant equality. The graph is read-only once built.
#[derive(Debug)]
pub struct Graph {
    vertices: SlotMap<VertexId, Vertex>,
    edges: SlotMap<EdgeId, GraphEdge>,
    incident: SecondaryMap<VertexId, Vec<EdgeId>>,
    lookup: HashMap<VertexKey, VertexId>,
    boundary: Polygon,
    obstacles: Vec<Polygon>,
}

impl Graph {
    /// Validates the rings and builds a graph from them.
    ///
    /// Shorthand for [`BuildGraph::execute`].
    ///
    /// # Errors
    ///
    /// See [`BuildGraph::execute`].
    pub fn build(boundary: &[Point3], obstacles: &[Vec<Point3>]) -> Result<Self> {
        BuildGraph::new(boundary.to_vec(), obstacles.to_vec()).execute()
    }

    /// Assembles a graph from polygons that have already been validated.
    pub(crate) fn from_polygons(boundary: Polygon, obstacles: Vec<Polygon>) -> Self {
        let mut graph = Self {
            vertices: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            incident: SecondaryMap::new(),
            lookup: HashMap::new(),
            boundary,
            obstacles: Vec::new(),
        };

        let rings: Vec<(Ring, Vec<Edge>)> = std::iter::once((Ring::Boundary, &graph.boundary))
            .chain(
                obstacles
                    .iter()
                    .enumerate()
                    .map(|(i, o)| (Ring::Obstacle(i), o)),
            )
            .map(|(ring, polygon)| (ring, polygon.edges().to_vec()))
            .collect();

        for (ring, edges) in rings {
            for edge in edges {
                graph.add_edge(edge, ring);
            }
        }

        graph.obstacles = obstacles;
        graph
    }

    /// Inserts a vertex, returning the id of an existing tolerantly-equal
    /// vertex if there is one.
    fn add_vertex(&mut self, vertex: Vertex) -> VertexId {
        if let Some(id) = self.find_vertex(&vertex, TOLERANCE) {
            return id;
        }
        let id = self.vertices.insert(vertex);
        self.incident.insert(id, Vec::new());
        self.lookup.insert(vertex.key(), id);
        id
    }

    /// Inserts an edge and its endpoints. Duplicate edges are ignored.
    fn add_edge(&mut self, edge: Edge, ring: Ring) {
        let start = self.add_vertex(*edge.start());
        let end = self.add_vertex(*edge.end());
        let duplicate = self.incident.get(start).is_some_and(|ids| {
            ids.iter()
                .filter_map(|&e| self.edges.get(e))
                .any(|ge| ge.is_incident_to(end))
        });
        if duplicate {
            return;
        }
        let id = self.edges.insert(GraphEdge {
            start,
            end,
            edge,
            ring,
        });
        for v in [start, end] {
            if let Some(list) = self.incident.get_mut(v) {
                list.push(id);
            }
        }
    }

    /// Looks up a vertex tolerantly equal to `vertex`.
    ///
    /// For `eps` up to [`TOLERANCE`] the snapped-key index is probed in the
    /// neighbouring grid cells; larger tolerances fall back to a linear scan.
    #[must_use]
    pub fn find_vertex(&self, vertex: &Vertex, eps: f64) -> Option<VertexId> {
        if eps > TOLERANCE {
            return self
                .vertices
                .iter()
                .find(|(_, v)| v.almost_eq(vertex, eps))
                .map(|(id, _)| id);
        }
        let key = vertex.key();
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(&id) = self.lookup.get(&key.offset(dx, dy, dz)) else {
                        continue;
                    };
                    if self.vertices.get(id).is_some_and(|v| v.almost_eq(vertex, eps)) {
                        return Some(id);
                    }
                }
            }
        }
        None
    }

    /// Returns the vertex with this id.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    /// Returns the edge with this id.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&GraphEdge> {
        self.edges.get(id)
    }

    /// Iterates over all vertices.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices.iter()
    }

    /// Iterates over all edges.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &GraphEdge)> {
        self.edges.iter()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges that have `id` as an endpoint.
    #[must_use]
    pub fn incident_edges(&self, id: VertexId) -> &[EdgeId] {
        self.incident.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The outer boundary polygon.
    #[must_use]
    pub fn boundary(&self) -> &Polygon {
        &self.boundary
    }

    /// The obstacle polygons, in input order.
    #[must_use]
    pub fn obstacles(&self) -> &[Polygon] {
        &self.obstacles
    }

    /// Returns `true` if `point` is in the boundary plane, inside or on the
    /// boundary, and not strictly inside any obstacle.
    #[must_use]
    pub fn in_free_space(&self, point: &Vertex, eps: f64) -> bool {
        self.boundary.is_in_plane(point, eps)
            && self.boundary.classify(point, eps) != Containment::Outside
            && self
                .obstacles
                .iter()
                .all(|o| o.classify(point, eps) != Containment::Inside)
    }

    /// Triangulates the free space: the boundary with every obstacle cut out.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::Failed` if the triangulation fails.
    pub fn free_space_mesh(&self) -> Result<TriangleMesh> {
        TessellatePolygon::new(&self.boundary)
            .with_holes(&self.obstacles)
            .execute()
    }
}
