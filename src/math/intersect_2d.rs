use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    // Sine of the angle between the directions, relative test.
    if cross.abs() <= TOLERANCE * d1.norm() * d2.norm() {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Linear interpolation: `origin + dir * t`.
#[must_use]
pub fn point_at(origin: &Point2, dir: &Vector2, t: f64) -> Point2 {
    origin + dir * t
}

/// Perpendicular bisector of the segment `a`-`b` as `(midpoint, direction)`.
#[must_use]
pub fn perpendicular_bisector(a: &Point2, b: &Point2) -> (Point2, Vector2) {
    let d = b - a;
    (nalgebra::center(a, b), Vector2::new(-d.y, d.x))
}

/// Intersection of the perpendicular bisectors of `a`-`b` and `c`-`d`.
///
/// Returns `None` when the bisectors are parallel or the result is not finite.
#[must_use]
pub fn bisector_intersect_2d(a: &Point2, b: &Point2, c: &Point2, d: &Point2) -> Option<Point2> {
    let (m1, d1) = perpendicular_bisector(a, b);
    let (m2, d2) = perpendicular_bisector(c, d);
    let (t, _) = line_line_intersect_2d(&m1, &d1, &m2, &d2)?;
    let pt = point_at(&m1, &d1, t);
    (pt.x.is_finite() && pt.y.is_finite()).then_some(pt)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn crossing_lines() {
        let (t, u) = line_line_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &Point2::new(2.0, -1.0),
            &Vector2::new(0.0, 1.0),
        )
        .unwrap();
        assert!((t - 2.0).abs() < TOLERANCE);
        assert!((u - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn parallel_lines() {
        let r = line_line_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Vector2::new(1.0, 1.0),
            &Point2::new(0.0, 1.0),
            &Vector2::new(2.0, 2.0),
        );
        assert!(r.is_none());
    }

    #[test]
    fn bisector_is_perpendicular() {
        let (mid, dir) = perpendicular_bisector(&Point2::new(0.0, 0.0), &Point2::new(4.0, 0.0));
        assert!((mid - Point2::new(2.0, 0.0)).norm() < TOLERANCE);
        assert!(dir.x.abs() < TOLERANCE);
    }

    #[test]
    fn bisectors_meet_at_circumcenter() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(4.0, 0.0);
        let c = Point2::new(0.0, 4.0);
        let o = bisector_intersect_2d(&a, &b, &b, &c).unwrap();
        assert!((o - Point2::new(2.0, 2.0)).norm() < 1e-9);
    }

    #[test]
    fn collinear_bisectors_do_not_meet() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(2.0, 0.0);
        assert!(bisector_intersect_2d(&a, &b, &b, &c).is_none());
    }
}
