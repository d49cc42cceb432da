use super::Point2;

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Winding number of `point` with respect to the closed ring `verts`.
///
/// Non-zero => inside, zero => outside. Points exactly on the ring may land
/// either way; callers test the boundary separately.
#[must_use]
pub fn winding_number_2d(point: &Point2, verts: &[Point2]) -> i32 {
    let n = verts.len();
    let mut winding = 0i32;
    for i in 0..n {
        let a = verts[i];
        let b = verts[(i + 1) % n];

        if a.y <= point.y {
            if b.y > point.y && cross_2d(&a, &b, point) > 0.0 {
                winding += 1;
            }
        } else if b.y <= point.y && cross_2d(&a, &b, point) < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// Returns the minimum distance from `point` to the segment `a`-`b`.
#[must_use]
pub fn point_to_segment_dist_2d(point: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < 1e-20 {
        return (point - a).norm();
    }

    // Project onto the infinite line, clamp to [0, 1].
    let t = ((point - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    (point - (a + d * t)).norm()
}

/// `(b - a) × (p - a)`: positive when `p` is left of `a → b`.
#[inline]
fn cross_2d(a: &Point2, b: &Point2, p: &Point2) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square() -> Vec<Point2> {
        vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)]
    }

    #[test]
    fn signed_area_follows_orientation() {
        let mut pts = square();
        assert!((signed_area_2d(&pts) - 100.0).abs() < TOL);
        pts.reverse();
        assert!((signed_area_2d(&pts) + 100.0).abs() < TOL);
    }

    #[test]
    fn signed_area_degenerate() {
        assert!(signed_area_2d(&[p(0.0, 0.0), p(1.0, 1.0)]).abs() < TOL);
        assert!(signed_area_2d(&[]).abs() < TOL);
    }

    #[test]
    fn winding_inside_outside() {
        let sq = square();
        assert_ne!(winding_number_2d(&p(5.0, 5.0), &sq), 0);
        assert_eq!(winding_number_2d(&p(15.0, 5.0), &sq), 0);
        assert_eq!(winding_number_2d(&p(5.0, -1.0), &sq), 0);
    }

    #[test]
    fn winding_concave_notch() {
        // U-shape open at the top between x=3 and x=7.
        let u = vec![
            p(0.0, 0.0),
            p(10.0, 0.0),
            p(10.0, 10.0),
            p(7.0, 10.0),
            p(7.0, 3.0),
            p(3.0, 3.0),
            p(3.0, 10.0),
            p(0.0, 10.0),
        ];
        assert_eq!(winding_number_2d(&p(5.0, 6.0), &u), 0);
        assert_ne!(winding_number_2d(&p(5.0, 1.0), &u), 0);
        assert_ne!(winding_number_2d(&p(1.0, 9.0), &u), 0);
    }

    #[test]
    fn segment_distance_projection_and_clamp() {
        let a = p(0.0, 0.0);
        let b = p(2.0, 0.0);
        assert!((point_to_segment_dist_2d(&p(1.0, 1.0), &a, &b) - 1.0).abs() < TOL);
        assert!((point_to_segment_dist_2d(&p(-1.0, 0.0), &a, &b) - 1.0).abs() < TOL);
        assert!(point_to_segment_dist_2d(&p(1.0, 0.0), &a, &b).abs() < TOL);
    }

    #[test]
    fn segment_distance_degenerate() {
        let a = p(0.0, 0.0);
        assert!((point_to_segment_dist_2d(&p(3.0, 4.0), &a, &a) - 5.0).abs() < TOL);
    }
}
