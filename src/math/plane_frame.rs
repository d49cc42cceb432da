use crate::error::{GeometryError, Result};

use super::{Point2, Point3, Vector3, TOLERANCE};

/// An orthonormal 2D coordinate frame embedded in a 3D plane.
///
/// Points are projected as `(d · u_dir, d · v_dir)` with `d = p - origin`,
/// and lifted back as `origin + u * u_dir + v * v_dir`.
///
/// The normal is canonicalised so that its first non-zero component among
/// `(z, y, x)` is positive. For rings in the XY plane this gives
/// `u_dir = +X` and `v_dir = +Y`, so projected angles match plain `atan2(y, x)`.
#[derive(Debug, Clone, Copy)]
pub struct PlaneFrame {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
}

impl PlaneFrame {
    /// Fits a frame to a closed ring of points using Newell's normal.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the ring has fewer than 3 points
    /// or all points are collinear.
    pub fn from_ring(points: &[Point3]) -> Result<Self> {
        if points.len() < 3 {
            return Err(
                GeometryError::Degenerate("plane needs at least 3 points".into()).into(),
            );
        }

        let n = points.len();
        let mut normal = Vector3::zeros();
        for i in 0..n {
            let a = &points[i];
            let b = &points[(i + 1) % n];
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }

        // Newell's normal has magnitude 2 * area; compare against the ring extent.
        let extent = ring_extent(points);
        let len = normal.norm();
        if len <= TOLERANCE * extent * extent || len < f64::MIN_POSITIVE {
            return Err(GeometryError::Degenerate("ring points are collinear".into()).into());
        }

        Self::from_normal(points[0], normal / len)
    }

    /// Creates a frame from an origin and a unit normal.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if the normal is zero-length.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        let len = normal.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let mut normal = normal / len;

        let flip = if normal.z.abs() > TOLERANCE {
            normal.z < 0.0
        } else if normal.y.abs() > TOLERANCE {
            normal.y < 0.0
        } else {
            normal.x < 0.0
        };
        if flip {
            normal = -normal;
        }

        // Gram-Schmidt a reference axis that is not parallel to the normal.
        let reference = if normal.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };
        let u_dir = (reference - normal * normal.dot(&reference)).normalize();
        let v_dir = normal.cross(&u_dir);

        Ok(Self {
            origin,
            u_dir,
            v_dir,
            normal,
        })
    }

    /// Returns the frame origin.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit normal of the plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the in-plane U axis.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the in-plane V axis.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Projects a 3D point into frame coordinates.
    #[must_use]
    pub fn project(&self, point: &Point3) -> Point2 {
        let d = point - self.origin;
        Point2::new(d.dot(&self.u_dir), d.dot(&self.v_dir))
    }

    /// Lifts frame coordinates back into 3D.
    #[must_use]
    pub fn lift(&self, uv: &Point2) -> Point3 {
        self.origin + self.u_dir * uv.x + self.v_dir * uv.y
    }

    /// Signed distance of `point` from the plane along the normal.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        (point - self.origin).dot(&self.normal)
    }
}

/// Largest axis-aligned extent of a point set, at least `1.0`.
pub(crate) fn ring_extent(points: &[Point3]) -> f64 {
    let mut min = Vector3::repeat(f64::INFINITY);
    let mut max = Vector3::repeat(f64::NEG_INFINITY);
    for p in points {
        min = min.inf(&p.coords);
        max = max.sup(&p.coords);
    }
    (max - min).max().max(1.0)
}
