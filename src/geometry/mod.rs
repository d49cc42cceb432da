mod bounding_box;
mod edge;
mod polygon;
mod vector;
mod vertex;

pub use bounding_box::BoundingBox;
pub use edge::{Edge, Intersection};
pub use polygon::{Containment, Polygon};
pub use vector::Vector;
pub use vertex::{Vertex, VertexKey};

use std::hash::Hash;

/// Capabilities shared by the primitive geometric values.
///
/// Equality and hashing come from `Eq + Hash` and must agree with each other;
/// the bounding box is the cheap reject used before exact predicates.
pub trait Primitive: Eq + Hash {
    /// Returns the axis-aligned bounding box of the primitive.
    fn bounding_box(&self) -> BoundingBox;
}
