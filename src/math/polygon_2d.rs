use super::{Point2, Vector2, TOLERANCE};

/// 2D outer (cross) product `a.x * b.y - a.y * b.x`.
///
/// Twice the signed area of the triangle spanned by `a` and `b`.
#[must_use]
pub fn outer_product(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

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

/// Returns `true` if every point lies within `eps` of the line through the
/// first point and the point farthest from it.
///
/// Fewer than three distinct points are always collinear.
#[must_use]
pub fn all_collinear(points: &[Point2], eps: f64) -> bool {
    let Some(origin) = points.first() else {
        return true;
    };
    let Some(far) = points
        .iter()
        .max_by(|a, b| {
            let da = (*a - origin).norm_squared();
            let db = (*b - origin).norm_squared();
            da.total_cmp(&db)
        })
        .filter(|p| (*p - origin).norm_squared() > TOLERANCE * TOLERANCE)
    else {
        return true;
    };

    let dir = far - origin;
    let len = dir.norm();
    points.iter().all(|p| {
        let rel = p - origin;
        (outer_product(&dir, &rel) / len).abs() <= eps.max(TOLERANCE * len)
    })
}

/// Convex hull by monotone chain, counter-clockwise, without collinear
/// boundary points. Returns fewer than three points for degenerate input.
#[must_use]
pub fn convex_hull_2d(points: &[Point2]) -> Vec<Point2> {
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let turns_left = |chain: &[Point2], p: &Point2| {
        let [.., a, b] = chain else {
            return true;
        };
        outer_product(&(b - a), &(p - a)) > 0.0
    };
    let mut lower: Vec<Point2> = Vec::with_capacity(pts.len());
    for p in &pts {
        while !turns_left(&lower, p) {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Point2> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while !turns_left(&upper, p) {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}
