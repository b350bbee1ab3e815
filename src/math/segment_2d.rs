use super::{Point2, TOLERANCE};

/// Closest point on a line segment to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// The projected point, lying on the segment.
    pub point: Point2,
    /// Normalized segment parameter of the projection, in `[0, 1]`.
    pub t: f64,
    /// Euclidean distance from the query point to `point`.
    pub distance: f64,
}

/// Projects `p` onto the segment `a → b`, clamping to the endpoints.
///
/// A zero-length segment projects everything onto `a` with `t = 0`.
#[must_use]
pub fn project_point_to_segment(p: &Point2, a: &Point2, b: &Point2) -> SegmentProjection {
    let ab = b - a;
    let len_sq = ab.norm_squared();

    if len_sq < TOLERANCE * TOLERANCE {
        return SegmentProjection {
            point: *a,
            t: 0.0,
            distance: (p - a).norm(),
        };
    }

    // Project onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    let point = a + ab * t;

    SegmentProjection {
        point,
        t,
        distance: (p - point).norm(),
    }
}
