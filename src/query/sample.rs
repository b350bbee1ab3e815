use serde::{Deserialize, Serialize};

use crate::cache::{CachedSection, PathCache};
use crate::math::{normalize_or_zero, Point2, Vector2};

/// Position and unit tangent at an arc length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleResult {
    pub pos: Point2,
    pub tangent: Vector2,
}

impl Default for SampleResult {
    fn default() -> Self {
        Self {
            pos: Point2::origin(),
            tangent: Vector2::zeros(),
        }
    }
}

/// Samples a cached path at an arc length.
pub struct SamplePath {
    t: f64,
}

impl SamplePath {
    /// Creates a new `SamplePath` query at arc length `t`.
    #[must_use]
    pub fn new(t: f64) -> Self {
        Self { t }
    }

    /// Executes the query.
    ///
    /// `t` is clamped to `[0, total_length]`. Position is interpolated
    /// along the bracketing segment and the tangent is that segment's unit
    /// direction. An empty cache yields the origin with a zero tangent.
    #[must_use]
    pub fn execute(&self, cache: &PathCache) -> SampleResult {
        let t = self.t.clamp(0.0, cache.total_length());
        cache
            .section_by_length(t)
            .map(|(_, section)| sample_section(section, t))
            .unwrap_or_default()
    }
}

fn sample_section(section: &CachedSection, t: f64) -> SampleResult {
    let points = &section.points;
    let Some(i) = points.iter().position(|p| p.length >= t) else {
        return SampleResult::default();
    };
    let p = points[i];

    if p.length > t && i > 0 {
        let prev = points[i - 1];
        let frac = (t - prev.length) / (p.length - prev.length);
        return SampleResult {
            pos: prev.pos + (p.pos - prev.pos) * frac,
            tangent: normalize_or_zero(&(p.pos - prev.pos)),
        };
    }

    // Exact hit: tangent from the adjacent existing segment.
    let tangent = if let Some(next) = points.get(i + 1) {
        normalize_or_zero(&(next.pos - p.pos))
    } else if i > 0 {
        normalize_or_zero(&(p.pos - points[i - 1].pos))
    } else {
        Vector2::zeros()
    };
    SampleResult { pos: p.pos, tangent }
}
