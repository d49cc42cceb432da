use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{GeometryError, OperationError, Result};
use crate::math::{MAX_COORDINATE, TOLERANCE};

use super::{BoundingBox, Primitive, Vector, Vertex};

/// An undirected line segment between two distinct vertices.
///
/// Length, direction and bounding box are computed once at construction.
/// Equality ignores orientation: `Edge(a, b) == Edge(b, a)`.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    start: Vertex,
    end: Vertex,
    length: f64,
    direction: Vector,
    bounding_box: BoundingBox,
}

/// The shape of an [`Edge::intersection`] result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intersection {
    /// The edges meet at a single point.
    Point(Vertex),
    /// The edges are collinear and share this sub-segment.
    Edge(Edge),
}

impl Edge {
    /// Creates an edge between two vertices.
    ///
    /// # Errors
    ///
    /// - `GeometryError::ZeroLengthEdge` if the vertices coincide within [`TOLERANCE`].
    /// - `GeometryError::Degenerate` if a coordinate is not finite.
    /// - `OperationError::InvalidArgument` if a coordinate exceeds [`MAX_COORDINATE`].
    pub fn new(start: Vertex, end: Vertex) -> Result<Self> {
        Self::new_with_tolerance(start, end, TOLERANCE)
    }

    /// Creates an edge, treating vertices closer than `eps` as coincident.
    ///
    /// # Errors
    ///
    /// See [`Edge::new`].
    pub fn new_with_tolerance(start: Vertex, end: Vertex, eps: f64) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(GeometryError::Degenerate(format!(
                "non-finite edge endpoint in {start} - {end}"
            ))
            .into());
        }
        if !start.is_in_range() || !end.is_in_range() {
            return Err(OperationError::InvalidArgument(format!(
                "edge {start} - {end} exceeds the coordinate range ±{MAX_COORDINATE}"
            ))
            .into());
        }
        if start.almost_eq(&end, eps) {
            return Err(GeometryError::ZeroLengthEdge {
                x: start.x(),
                y: start.y(),
                z: start.z(),
            }
            .into());
        }
        Ok(Self {
            start,
            end,
            length: start.distance_to(&end),
            direction: Vector::by_two_vertices(&start, &end),
            bounding_box: BoundingBox::from_vertices(&start, &end),
        })
    }

    #[must_use]
    pub fn start(&self) -> &Vertex {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> &Vertex {
        &self.end
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// The unnormalised direction `end - start`.
    #[must_use]
    pub fn direction(&self) -> &Vector {
        &self.direction
    }

    #[must_use]
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    /// Midpoint of the segment.
    #[must_use]
    pub fn midpoint(&self) -> Vertex {
        self.start.translate(&self.direction.scale(0.5))
    }

    /// Returns `true` if `vertex` equals either endpoint within [`TOLERANCE`].
    #[must_use]
    pub fn contains(&self, vertex: &Vertex) -> bool {
        self.contains_with_tolerance(vertex, TOLERANCE)
    }

    #[must_use]
    pub fn contains_with_tolerance(&self, vertex: &Vertex, eps: f64) -> bool {
        self.start.almost_eq(vertex, eps) || self.end.almost_eq(vertex, eps)
    }

    /// Returns the endpoint opposite to `vertex`, or `None` if `vertex` is not
    /// an endpoint.
    #[must_use]
    pub fn vertex_pair(&self, vertex: &Vertex) -> Option<Vertex> {
        if self.start.almost_eq(vertex, TOLERANCE) {
            Some(self.end)
        } else if self.end.almost_eq(vertex, TOLERANCE) {
            Some(self.start)
        } else {
            None
        }
    }

    /// Undirected tolerant equality.
    #[must_use]
    pub fn almost_eq(&self, other: &Edge, eps: f64) -> bool {
        (self.start.almost_eq(&other.start, eps) && self.end.almost_eq(&other.end, eps))
            || (self.start.almost_eq(&other.end, eps) && self.end.almost_eq(&other.start, eps))
    }

    #[must_use]
    pub fn is_parallel_to(&self, other: &Edge) -> bool {
        self.direction.is_parallel_to(&other.direction)
    }

    /// Returns `true` if both edges lie in one plane.
    #[must_use]
    pub fn is_coplanar_to(&self, other: &Edge) -> bool {
        self.is_coplanar_to_with_tolerance(other, TOLERANCE)
    }

    /// Scalar triple product test, relative to the operand magnitudes.
    #[must_use]
    pub fn is_coplanar_to_with_tolerance(&self, other: &Edge, eps: f64) -> bool {
        let a = &self.direction;
        let b = &other.direction;
        let c = Vector::by_two_vertices(&self.start, &other.start);
        let triple = c.dot(&a.cross(b));
        triple.abs() <= eps * a.length() * b.length() * c.length()
    }

    /// Distance from `vertex` to this segment.
    #[must_use]
    pub fn distance_to_vertex(&self, vertex: &Vertex) -> f64 {
        vertex.distance_to_edge(self)
    }

    /// Minimum distance between two edges.
    ///
    /// Coplanar edges take the smallest endpoint-to-segment distance. Skew
    /// edges use the line-line distance `|c · (a × b)| / |a × b|`.
    #[must_use]
    pub fn distance_to(&self, other: &Edge) -> f64 {
        if self.is_coplanar_to(other) {
            return [
                self.start.distance_to_edge(other),
                self.end.distance_to_edge(other),
                other.start.distance_to_edge(self),
                other.end.distance_to_edge(self),
            ]
            .into_iter()
            .fold(f64::INFINITY, f64::min);
        }
        let a = &self.direction;
        let b = &other.direction;
        let c = Vector::by_two_vertices(&self.start, &other.start);
        let cross = a.cross(b);
        c.dot(&cross).abs() / cross.length()
    }

    /// Returns `true` if the edges touch, cross or overlap.
    #[must_use]
    pub fn intersects(&self, other: &Edge) -> bool {
        self.intersects_with_tolerance(other, TOLERANCE)
    }

    #[must_use]
    pub fn intersects_with_tolerance(&self, other: &Edge, eps: f64) -> bool {
        // Touching collinear edges are caught here before the general solver.
        if (self.start.on_edge_with_tolerance(other, eps)
            || self.end.on_edge_with_tolerance(other, eps))
            && self.direction.is_parallel_to_with_tolerance(&other.direction, eps)
        {
            return true;
        }
        self.intersection_with_tolerance(other, eps).is_some()
    }

    /// Computes where two edges meet.
    ///
    /// Returns `None` if they do not meet, [`Intersection::Point`] for a single
    /// contact point and [`Intersection::Edge`] for a collinear overlap.
    #[must_use]
    pub fn intersection(&self, other: &Edge) -> Option<Intersection> {
        self.intersection_with_tolerance(other, TOLERANCE)
    }

    #[must_use]
    pub fn intersection_with_tolerance(&self, other: &Edge, eps: f64) -> Option<Intersection> {
        if !self
            .bounding_box
            .intersects_with_tolerance(&other.bounding_box, eps)
        {
            return None;
        }
        if !self.is_coplanar_to_with_tolerance(other, eps) {
            return None;
        }
        if self.almost_eq(other, eps) {
            return Some(Intersection::Edge(*self));
        }

        let a = &self.direction;
        let b = &other.direction;

        if a.is_parallel_to_with_tolerance(b, eps) {
            return self.collinear_overlap(other, eps);
        }

        if other.contains_with_tolerance(&self.start, eps) {
            return Some(Intersection::Point(self.start));
        }
        if other.contains_with_tolerance(&self.end, eps) {
            return Some(Intersection::Point(self.end));
        }

        // Line-line parameter along this edge.
        let c = Vector::by_two_vertices(&self.start, &other.start);
        let axb = a.cross(b);
        let s = c.cross(b).dot(&axb) / axb.length().powi(2);

        // `s` is unitless; scale it back to a distance before comparing.
        let along = s * self.length;
        if along.abs() < eps {
            let touching = [
                (self.start, other),
                (self.end, other),
                (other.start, self),
                (other.end, self),
            ]
            .into_iter()
            .find(|(v, e)| v.on_edge_with_tolerance(e, eps));
            if let Some((v, _)) = touching {
                return Some(Intersection::Point(v));
            }
        }

        if along.is_nan() || along < -eps || along > self.length + eps {
            return None;
        }

        let hit = self.start.translate(&a.scale(s));
        for endpoint in [other.start, other.end, self.start, self.end] {
            if hit.almost_eq(&endpoint, eps) {
                return Some(Intersection::Point(endpoint));
            }
        }
        if !hit.on_edge_with_tolerance(other, eps) {
            return None;
        }
        Some(Intersection::Point(hit))
    }

    /// Overlap of two parallel edges, if they are collinear and touch.
    fn collinear_overlap(&self, other: &Edge, eps: f64) -> Option<Intersection> {
        let other_in_self = other.start.on_edge_with_tolerance(self, eps)
            && other.end.on_edge_with_tolerance(self, eps);
        if other_in_self {
            return Some(Intersection::Edge(*other));
        }
        let self_in_other = self.start.on_edge_with_tolerance(other, eps)
            && self.end.on_edge_with_tolerance(other, eps);
        if self_in_other {
            return Some(Intersection::Edge(*self));
        }

        let partial = self.start.on_edge_with_tolerance(other, eps)
            || self.end.on_edge_with_tolerance(other, eps)
            || other.start.on_edge_with_tolerance(self, eps)
            || other.end.on_edge_with_tolerance(self, eps);
        if !partial {
            return None;
        }

        // The two middle vertices in (Y, X, Z) order bound the shared interval.
        let mut vertices = [self.start, self.end, other.start, other.end];
        vertices.sort_by(Vertex::cmp_yxz);
        match Edge::new_with_tolerance(vertices[1], vertices[2], eps) {
            Ok(edge) => Some(Intersection::Edge(edge)),
            // End-to-end contact.
            Err(_) => Some(Intersection::Point(vertices[1])),
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.start == other.start && self.end == other.end)
            || (self.start == other.end && self.end == other.start)
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let a = self.start.key();
        let b = self.end.key();
        if a <= b {
            a.hash(state);
            b.hash(state);
        } else {
            b.hash(state);
            a.hash(state);
        }
    }
}

impl Primitive for Edge {
    fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge(StartVertex: {}, EndVertex: {})", self.start, self.end)
    }
}
