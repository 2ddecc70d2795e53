use super::polygon_2d::outer_product;
use super::{Point2, TOLERANCE};

/// The circle passing through the three vertices of a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumcircle {
    /// Center of the circle.
    pub center: Point2,
    /// Radius of the circle.
    pub radius: f64,
}

impl Circumcircle {
    /// Computes the circumcircle of `a`, `b`, `c`.
    ///
    /// Returns `None` if the points are collinear (or coincident) or the
    /// result is not finite. Collinearity is judged on the sine of the
    /// largest angle.
    #[must_use]
    pub fn from_points(a: &Point2, b: &Point2, c: &Point2) -> Option<Self> {
        // Measure from the corner opposite the longest side.
        let opp_a = (c - b).norm_squared();
        let opp_b = (a - c).norm_squared();
        let opp_c = (b - a).norm_squared();
        let (o, u, v) = if opp_a >= opp_b && opp_a >= opp_c {
            (a, b, c)
        } else if opp_b >= opp_c {
            (b, c, a)
        } else {
            (c, a, b)
        };

        let ou = u - o;
        let ov = v - o;
        let ou2 = ou.norm_squared();
        let ov2 = ov.norm_squared();
        let d = 2.0 * outer_product(&ou, &ov);
        if d.abs() <= 2.0 * TOLERANCE * (ou2 * ov2).sqrt() {
            return None;
        }

        let ux = (ov.y * ou2 - ou.y * ov2) / d;
        let uy = (ou.x * ov2 - ov.x * ou2) / d;

        let center = Point2::new(o.x + ux, o.y + uy);
        let radius = ux.hypot(uy);
        if !(center.x.is_finite() && center.y.is_finite() && radius.is_finite()) {
            return None;
        }
        Some(Self { center, radius })
    }

    /// Returns `true` if `p` lies strictly inside the circle.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        nalgebra::distance_squared(&self.center, p) < self.radius * self.radius
    }

    /// Returns `true` if `p` lies outside the circle's axis-aligned bounding box.
    ///
    /// A cheap necessary condition: a point outside the box cannot lie inside
    /// the circle or the triangle it circumscribes.
    #[must_use]
    pub fn bbox_excludes(&self, p: &Point2) -> bool {
        (self.center.x - p.x).abs() > self.radius || (self.center.y - p.y).abs() > self.radius
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn right_triangle() {
        let c = Circumcircle::from_points(
            &Point2::new(0.0, 0.0),
            &Point2::new(10.0, 0.0),
            &Point2::new(0.0, 10.0),
        )
        .unwrap();
        assert_relative_eq!(c.center.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(c.center.y, 5.0, epsilon = 1e-9);
        assert_relative_eq!(c.radius, 50.0_f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn orientation_does_not_matter() {
        let a = Point2::new(1.0, 2.0);
        let b = Point2::new(4.0, -1.0);
        let c = Point2::new(3.0, 5.0);
        let ccw = Circumcircle::from_points(&a, &b, &c).unwrap();
        let cw = Circumcircle::from_points(&a, &c, &b).unwrap();
        assert_relative_eq!(ccw.center.x, cw.center.x, epsilon = 1e-9);
        assert_relative_eq!(ccw.center.y, cw.center.y, epsilon = 1e-9);
        assert_relative_eq!(ccw.radius, cw.radius, epsilon = 1e-9);
    }

    #[test]
    fn equidistant_from_vertices() {
        let pts = [
            Point2::new(-3.0, 0.5),
            Point2::new(2.0, 7.0),
            Point2::new(6.0, -2.0),
        ];
        let c = Circumcircle::from_points(&pts[0], &pts[1], &pts[2]).unwrap();
        for p in &pts {
            assert_relative_eq!((p - c.center).norm(), c.radius, epsilon = 1e-9);
        }
    }

    #[test]
    fn collinear_is_degenerate() {
        let r = Circumcircle::from_points(
            &Point2::new(0.0, 0.0),
            &Point2::new(5.0, 0.0),
            &Point2::new(10.0, 0.0),
        );
        assert!(r.is_none());
    }

    #[test]
    fn coincident_is_degenerate() {
        let p = Point2::new(1.0, 1.0);
        assert!(Circumcircle::from_points(&p, &p, &p).is_none());
    }

    #[test]
    fn sliver_next_to_distant_corner() {
        let far = Point2::new(1.0e7, -1.0e7);
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(0.001, 0.0);
        for (p, q, r) in [(&far, &a, &b), (&a, &far, &b), (&a, &b, &far)] {
            let c = Circumcircle::from_points(p, q, r).unwrap();
            assert_relative_eq!(c.center.x, 0.0005, epsilon = 1e-6);
            assert_relative_eq!((a - c.center).norm(), c.radius, max_relative = 1e-9);
        }
    }

    #[test]
    fn nearly_flat_triangle_is_kept() {
        let c = Circumcircle::from_points(
            &Point2::new(0.0, 0.0),
            &Point2::new(10.0, 0.0),
            &Point2::new(5.0, 1e-4),
        )
        .unwrap();
        assert!(c.radius > 1.0e5);
    }

    #[test]
    fn strict_containment() {
        let c = Circumcircle {
            center: Point2::origin(),
            radius: 1.0,
        };
        assert!(c.contains(&Point2::new(0.5, 0.5)));
        assert!(!c.contains(&Point2::new(1.0, 0.0)));
        assert!(!c.contains(&Point2::new(2.0, 0.0)));
    }

    #[test]
    fn bbox_rejection() {
        let c = Circumcircle {
            center: Point2::origin(),
            radius: 1.0,
        };
        assert!(!c.bbox_excludes(&Point2::new(0.9, 0.9)));
        assert!(c.bbox_excludes(&Point2::new(1.5, 0.0)));
        assert!(c.bbox_excludes(&Point2::new(0.0, -1.5)));
    }
}
