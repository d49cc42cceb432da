use crate::error::{GeometryError, OperationError, Result, TopologyError};
use crate::math::plane_frame::ring_extent;
use crate::math::polygon_2d::{point_to_segment_dist_2d, signed_area_2d, winding_number_2d};
use crate::math::{PlaneFrame, Point2, Point3, MAX_COORDINATE, TOLERANCE};

use super::{BoundingBox, Edge, Intersection, Vertex};

/// Where a point sits relative to a closed ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    Inside,
    Boundary,
    Outside,
}

/// A closed planar ring of vertices.
///
/// Construction checks for empty or non-finite input, zero-length segments,
/// fewer than 3 distinct vertices, collinear and non-planar rings. Simplicity
/// is not enforced here; see [`Polygon::first_self_intersection`].
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    frame: PlaneFrame,
    projected: Vec<Point2>,
}

impl Polygon {
    /// Creates a polygon from an ordered ring of points.
    ///
    /// A trailing point equal to the first is read as explicit closure and
    /// dropped.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidArgument` for an empty ring, non-finite
    ///   coordinates or coordinates beyond [`MAX_COORDINATE`].
    /// - `GeometryError::ZeroLengthEdge` for repeated consecutive points.
    /// - `GeometryError::Degenerate` for fewer than 3 distinct or collinear points.
    /// - `TopologyError::NonPlanar` if the points do not share a plane.
    pub fn new(points: &[Point3]) -> Result<Self> {
        Self::from_vertices(points.iter().copied().map(Vertex::from_point).collect())
    }

    /// Creates a polygon from an ordered ring of vertices.
    ///
    /// # Errors
    ///
    /// See [`Polygon::new`].
    pub fn from_vertices(mut vertices: Vec<Vertex>) -> Result<Self> {
        if vertices.is_empty() {
            return Err(OperationError::InvalidArgument("polygon ring is empty".into()).into());
        }
        if let Some(bad) = vertices.iter().find(|v| !v.is_finite()) {
            return Err(OperationError::InvalidArgument(format!(
                "non-finite polygon coordinate {bad}"
            ))
            .into());
        }
        if let Some(bad) = vertices.iter().find(|v| !v.is_in_range()) {
            return Err(OperationError::InvalidArgument(format!(
                "polygon coordinate {bad} exceeds ±{MAX_COORDINATE}"
            ))
            .into());
        }
        if vertices.len() > 1 && vertices[0].almost_eq(&vertices[vertices.len() - 1], TOLERANCE)
        {
            vertices.pop();
        }

        let mut distinct: Vec<Vertex> = Vec::with_capacity(vertices.len());
        for v in &vertices {
            if !distinct.iter().any(|d| d.almost_eq(v, TOLERANCE)) {
                distinct.push(*v);
            }
        }
        if distinct.len() < 3 {
            return Err(GeometryError::Degenerate(format!(
                "polygon needs at least 3 distinct vertices, got {}",
                distinct.len()
            ))
            .into());
        }

        let n = vertices.len();
        let edges = (0..n)
            .map(|i| Edge::new(vertices[i], vertices[(i + 1) % n]))
            .collect::<Result<Vec<_>>>()?;

        let points: Vec<Point3> = vertices.iter().map(|v| *v.point()).collect();
        let frame = PlaneFrame::from_ring(&points)?;
        let plane_tol = TOLERANCE * ring_extent(&points);
        if let Some(off) = points
            .iter()
            .find(|p| frame.signed_distance(p).abs() > plane_tol)
        {
            return Err(TopologyError::NonPlanar(format!(
                "point ({}, {}, {}) is off the ring plane",
                off.x, off.y, off.z
            ))
            .into());
        }
        let projected = points.iter().map(|p| frame.project(p)).collect();

        Ok(Self {
            vertices,
            edges,
            frame,
            projected,
        })
    }

    /// The ring vertices, without a repeated closing vertex.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The ring edges; edge `i` runs from vertex `i` to vertex `i + 1`.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The plane frame fitted to the ring.
    #[must_use]
    pub fn frame(&self) -> &PlaneFrame {
        &self.frame
    }

    /// Signed area in the frame; positive when the ring runs counter-clockwise
    /// around the frame normal.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.projected)
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        self.edges
            .iter()
            .skip(1)
            .fold(*self.edges[0].bounding_box(), |bb, e| {
                bb.union(e.bounding_box())
            })
    }

    /// Returns `true` if `point` is within `eps` of the ring plane.
    #[must_use]
    pub fn is_in_plane(&self, point: &Vertex, eps: f64) -> bool {
        let scale = self.bounding_box().diagonal().max(1.0);
        self.frame.signed_distance(point.point()).abs() <= eps * scale
    }

    /// Classifies a point lying in the ring plane.
    #[must_use]
    pub fn classify(&self, point: &Vertex, eps: f64) -> Containment {
        let uv = self.frame.project(point.point());
        let n = self.projected.len();
        for i in 0..n {
            let a = &self.projected[i];
            let b = &self.projected[(i + 1) % n];
            if point_to_segment_dist_2d(&uv, a, b) <= eps {
                return Containment::Boundary;
            }
        }
        if winding_number_2d(&uv, &self.projected) == 0 {
            Containment::Outside
        } else {
            Containment::Inside
        }
    }

    /// Returns the first pair of edge indices that meet illegally, if any.
    ///
    /// Adjacent edges may only share their common vertex; non-adjacent edges
    /// may not meet at all.
    #[must_use]
    pub fn first_self_intersection(&self, eps: f64) -> Option<(usize, usize)> {
        let n = self.edges.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let adjacent = j == i + 1 || (i == 0 && j == n - 1);
                let hit = self.edges[i].intersection_with_tolerance(&self.edges[j], eps);
                let legal = match hit {
                    None => true,
                    Some(Intersection::Point(p)) if adjacent => {
                        let shared = if j == i + 1 { self.vertices[j] } else { self.vertices[0] };
                        p.almost_eq(&shared, eps)
                    }
                    Some(_) => false,
                };
                if !legal {
                    return Some((i, j));
                }
            }
        }
        None
    }

    /// Returns `true` if no two edges meet except adjacent edges at their
    /// shared vertex.
    #[must_use]
    pub fn is_simple(&self, eps: f64) -> bool {
        self.first_self_intersection(eps).is_none()
    }
}
