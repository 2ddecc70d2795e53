use super::Point2;

/// Returns `true` if `p`, assumed collinear with `a` and `b`, lies between
/// them (endpoints included).
///
/// The relative offsets `a - p` and `b - p` point in opposite directions
/// exactly when their dot product is non-positive.
#[must_use]
pub fn lies_between(p: &Point2, a: &Point2, b: &Point2, eps: f64) -> bool {
    (a - p).dot(&(b - p)) <= eps
}

/// Returns the index of the point closest to `query`.
///
/// Ties keep the earliest index. Returns `None` for an empty slice.
#[must_use]
pub fn nearest_index<'a, I>(points: I, query: &Point2) -> Option<usize>
where
    I: IntoIterator<Item = &'a Point2>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, pt) in points.into_iter().enumerate() {
        let d2 = nalgebra::distance_squared(pt, query);
        match best {
            Some((_, best_d2)) if d2 >= best_d2 => {}
            _ => best = Some((i, d2)),
        }
    }
    best.map(|(i, _)| i)
}
