use std::fmt;

use crate::math::{Vector3, TOLERANCE};

use super::Vertex;

/// A 3D direction or displacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    inner: Vector3,
}

impl Vector {
    /// Creates a vector from components.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            inner: Vector3::new(x, y, z),
        }
    }

    /// Creates the displacement `end - start`.
    #[must_use]
    pub fn by_two_vertices(start: &Vertex, end: &Vertex) -> Self {
        Self {
            inner: end.point() - start.point(),
        }
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.inner.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.inner.y
    }

    #[must_use]
    pub fn z(&self) -> f64 {
        self.inner.z
    }

    /// Returns the underlying nalgebra vector.
    #[must_use]
    pub fn as_vector3(&self) -> &Vector3 {
        &self.inner
    }

    #[must_use]
    pub fn dot(&self, other: &Vector) -> f64 {
        self.inner.dot(&other.inner)
    }

    #[must_use]
    pub fn cross(&self, other: &Vector) -> Vector {
        Vector {
            inner: self.inner.cross(&other.inner),
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.inner.norm()
    }

    #[must_use]
    pub fn scale(&self, factor: f64) -> Vector {
        Vector {
            inner: self.inner * factor,
        }
    }

    /// Returns `true` if the vectors are parallel (or anti-parallel) within
    /// [`TOLERANCE`].
    #[must_use]
    pub fn is_parallel_to(&self, other: &Vector) -> bool {
        self.is_parallel_to_with_tolerance(other, TOLERANCE)
    }

    /// Returns `true` if `|a × b| <= eps · |a| · |b|`.
    ///
    /// A zero vector is parallel to everything.
    #[must_use]
    pub fn is_parallel_to_with_tolerance(&self, other: &Vector, eps: f64) -> bool {
        self.cross(other).length() <= eps * self.length() * other.length()
    }
}

impl From<Vector3> for Vector {
    fn from(inner: Vector3) -> Self {
        Self { inner }
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vector(X: {}, Y: {}, Z: {})",
            self.inner.x, self.inner.y, self.inner.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn products_and_length() {
        let a = Vector::new(1.0, 0.0, 0.0);
        let b = Vector::new(0.0, 2.0, 0.0);
        assert!(a.dot(&b).abs() < TOLERANCE);
        assert_eq!(a.cross(&b), Vector::new(0.0, 0.0, 2.0));
        assert!((Vector::new(3.0, 4.0, 0.0).length() - 5.0).abs() < TOLERANCE);
        assert_eq!(b.scale(0.5), Vector::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn from_two_vertices() {
        let v = Vector::by_two_vertices(&Vertex::new(1.0, 1.0, 0.0), &Vertex::new(4.0, 5.0, 0.0));
        assert_eq!(v, Vector::new(3.0, 4.0, 0.0));
    }

    #[test]
    fn parallel_is_scale_independent() {
        let a = Vector::new(1e-6, 1e-6, 0.0);
        let b = Vector::new(-1e6, -1e6, 0.0);
        assert!(a.is_parallel_to(&b));
        assert!(!a.is_parallel_to(&Vector::new(1e6, 0.0, 0.0)));
    }
}
