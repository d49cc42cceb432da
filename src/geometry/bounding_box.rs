use crate::math::TOLERANCE;

use super::Vertex;

/// An axis-aligned bounding box.
///
/// Invariant: `min` is component-wise no greater than `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min: Vertex,
    max: Vertex,
}

impl BoundingBox {
    /// Creates the box spanned by two corner vertices in any order.
    #[must_use]
    pub fn from_vertices(a: &Vertex, b: &Vertex) -> Self {
        Self {
            min: Vertex::new(a.x().min(b.x()), a.y().min(b.y()), a.z().min(b.z())),
            max: Vertex::new(a.x().max(b.x()), a.y().max(b.y()), a.z().max(b.z())),
        }
    }

    /// Creates the smallest box containing every vertex, or `None` if empty.
    #[must_use]
    pub fn from_points<'a, I>(vertices: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Vertex>,
    {
        let mut iter = vertices.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::from_vertices(first, first), |bb, v| {
            bb.union(&Self::from_vertices(v, v))
        }))
    }

    #[must_use]
    pub fn min(&self) -> &Vertex {
        &self.min
    }

    #[must_use]
    pub fn max(&self) -> &Vertex {
        &self.max
    }

    /// Returns the smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        Self {
            min: Vertex::new(
                self.min.x().min(other.min.x()),
                self.min.y().min(other.min.y()),
                self.min.z().min(other.min.z()),
            ),
            max: Vertex::new(
                self.max.x().max(other.max.x()),
                self.max.y().max(other.max.y()),
                self.max.z().max(other.max.z()),
            ),
        }
    }

    /// Length of the box diagonal.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        self.min.distance_to(&self.max)
    }

    /// Returns `true` if the boxes overlap or touch within [`TOLERANCE`].
    #[must_use]
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.intersects_with_tolerance(other, TOLERANCE)
    }

    /// Returns `true` if the boxes overlap or touch once both are grown by `eps`.
    #[must_use]
    pub fn intersects_with_tolerance(&self, other: &BoundingBox, eps: f64) -> bool {
        self.min.x() <= other.max.x() + eps
            && other.min.x() <= self.max.x() + eps
            && self.min.y() <= other.max.y() + eps
            && other.min.y() <= self.max.y() + eps
            && self.min.z() <= other.max.z() + eps
            && other.min.z() <= self.max.z() + eps
    }

    /// Returns `true` if `vertex` lies inside the box grown by `eps`.
    #[must_use]
    pub fn contains_with_tolerance(&self, vertex: &Vertex, eps: f64) -> bool {
        vertex.x() >= self.min.x() - eps
            && vertex.x() <= self.max.x() + eps
            && vertex.y() >= self.min.y() - eps
            && vertex.y() <= self.max.y() + eps
            && vertex.z() >= self.min.z() - eps
            && vertex.z() <= self.max.z() + eps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bb(ax: f64, ay: f64, bx: f64, by: f64) -> BoundingBox {
        BoundingBox::from_vertices(&Vertex::new(ax, ay, 0.0), &Vertex::new(bx, by, 0.0))
    }

    #[test]
    fn corners_are_ordered() {
        let b = bb(10.0, 0.0, 0.0, 5.0);
        assert_eq!(*b.min(), Vertex::new(0.0, 0.0, 0.0));
        assert_eq!(*b.max(), Vertex::new(10.0, 5.0, 0.0));
    }

    #[test]
    fn overlap_touch_and_separation() {
        let a = bb(0.0, 0.0, 10.0, 0.0);
        assert!(a.intersects(&bb(5.0, -5.0, 5.0, 5.0)));
        // Touching at a single point still counts.
        assert!(a.intersects(&bb(10.0, 0.0, 20.0, 0.0)));
        assert!(!a.intersects(&bb(20.0, 0.0, 30.0, 0.0)));
        assert!(!a.intersects(&bb(0.0, 1.0, 10.0, 2.0)));
    }

    #[test]
    fn from_points_and_diagonal() {
        let pts = [
            Vertex::new(1.0, 2.0, 0.0),
            Vertex::new(4.0, -2.0, 0.0),
            Vertex::new(0.0, 1.0, 0.0),
        ];
        let b = BoundingBox::from_points(&pts).unwrap_or_else(|| bb(0.0, 0.0, 0.0, 0.0));
        assert_eq!(*b.min(), Vertex::new(0.0, -2.0, 0.0));
        assert_eq!(*b.max(), Vertex::new(4.0, 2.0, 0.0));
        assert!((b.diagonal() - 5.656_854_249_492_381).abs() < 1e-12);
        assert!(BoundingBox::from_points(std::iter::empty()).is_none());
    }
}
