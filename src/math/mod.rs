pub mod plane_frame;
pub mod polygon_2d;

pub use plane_frame::PlaneFrame;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Default geometric tolerance for floating-point comparisons.
///
/// Used by every predicate that has no explicit `_with_tolerance` form and as
/// the grid pitch for snapped vertex equality and hashing.
pub const TOLERANCE: f64 = 1e-9;

/// Largest coordinate magnitude accepted by edges and polygons.
///
/// Snapped vertex keys count [`TOLERANCE`] steps in an `i64`; past this bound
/// they would saturate and distinct vertices would compare equal.
pub const MAX_COORDINATE: f64 = 1e9;

/// Returns `true` if `a` and `b` differ by less than `eps`.
#[inline]
#[must_use]
pub fn almost_equal(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}
