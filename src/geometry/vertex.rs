use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::math::{almost_equal, Point3, MAX_COORDINATE, TOLERANCE};

use super::{BoundingBox, Edge, Primitive, Vector};

/// A point in 3D space with tolerant equality.
///
/// [`Vertex::almost_eq`] compares each coordinate against an explicit epsilon.
/// `PartialEq` and `Hash` both go through [`VertexKey`], which snaps the
/// coordinates onto a grid of pitch [`TOLERANCE`], so equal vertices always
/// hash equally. The grid is exact for coordinates up to [`MAX_COORDINATE`]
/// in magnitude; [`Edge`] and polygon construction reject anything larger.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    point: Point3,
}

/// Snapped integer coordinates of a [`Vertex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexKey {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl VertexKey {
    /// Returns the key offset by whole grid cells.
    #[must_use]
    pub fn offset(&self, dx: i64, dy: i64, dz: i64) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            z: self.z.saturating_add(dz),
        }
    }
}

impl Vertex {
    /// Creates a vertex from coordinates.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            point: Point3::new(x, y, z),
        }
    }

    /// Creates a vertex from a point.
    #[must_use]
    pub fn from_point(point: Point3) -> Self {
        Self { point }
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.point.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.point.y
    }

    #[must_use]
    pub fn z(&self) -> f64 {
        self.point.z
    }

    /// Returns the underlying point.
    #[must_use]
    pub fn point(&self) -> &Point3 {
        &self.point
    }

    /// Returns `true` if all coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.point.iter().all(|c| c.is_finite())
    }

    /// Returns `true` if every coordinate is within [`MAX_COORDINATE`].
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        self.point.iter().all(|c| c.abs() <= MAX_COORDINATE)
    }

    /// Returns the snapped grid key used for equality and hashing.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn key(&self) -> VertexKey {
        let snap = |c: f64| (c / TOLERANCE).round() as i64;
        VertexKey {
            x: snap(self.point.x),
            y: snap(self.point.y),
            z: snap(self.point.z),
        }
    }

    /// Returns `true` if every coordinate differs from `other` by less than `eps`.
    #[must_use]
    pub fn almost_eq(&self, other: &Vertex, eps: f64) -> bool {
        almost_equal(self.point.x, other.point.x, eps)
            && almost_equal(self.point.y, other.point.y, eps)
            && almost_equal(self.point.z, other.point.z, eps)
    }

    /// Euclidean distance to another vertex.
    #[must_use]
    pub fn distance_to(&self, other: &Vertex) -> f64 {
        (other.point - self.point).norm()
    }

    /// Distance to the closest point of `edge`.
    ///
    /// The projection onto the edge's line is clamped to the segment, so points
    /// beyond either end measure to the nearest endpoint.
    #[must_use]
    pub fn distance_to_edge(&self, edge: &Edge) -> f64 {
        let d = edge.direction().as_vector3();
        let to_self = self.point - edge.start().point;
        let t = (to_self.dot(d) / d.norm_squared()).clamp(0.0, 1.0);
        let closest = edge.start().point + d * t;
        (self.point - closest).norm()
    }

    /// Returns `true` if this vertex lies on `edge` within [`TOLERANCE`].
    #[must_use]
    pub fn on_edge(&self, edge: &Edge) -> bool {
        self.on_edge_with_tolerance(edge, TOLERANCE)
    }

    /// Returns `true` if this vertex lies on `edge` within `eps`.
    #[must_use]
    pub fn on_edge_with_tolerance(&self, edge: &Edge, eps: f64) -> bool {
        edge.bounding_box().contains_with_tolerance(self, eps) && self.distance_to_edge(edge) <= eps
    }

    /// Returns this vertex moved by `vector`.
    #[must_use]
    pub fn translate(&self, vector: &Vector) -> Vertex {
        Vertex::from_point(self.point + vector.as_vector3())
    }

    /// Orders vertices by snapped `(Y, X, Z)`.
    ///
    /// Used to pick collinear overlaps and to break angular ties; downstream
    /// polygon assembly relies on this exact key order.
    #[must_use]
    pub fn cmp_yxz(&self, other: &Vertex) -> Ordering {
        let a = self.key();
        let b = other.key();
        a.y.cmp(&b.y).then(a.x.cmp(&b.x)).then(a.z.cmp(&b.z))
    }
}

impl From<Point3> for Vertex {
    fn from(point: Point3) -> Self {
        Self::from_point(point)
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl Primitive for Vertex {
    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_vertices(self, self)
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vertex(X: {}, Y: {}, Z: {})",
            self.point.x, self.point.y, self.point.z
        )
    }
}
