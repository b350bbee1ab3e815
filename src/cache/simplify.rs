use crate::math::normalize_or_zero;

use super::{CachedSection, PathCache, PathPoint};

/// Point counts before and after a [`Simplify`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimplifyStats {
    pub points_before: usize,
    pub points_after: usize,
}

/// Removes near-collinear interior points from every cached section.
///
/// Two consecutive segments are merged when the dot product of their unit
/// directions exceeds `tolerance`. Section endpoints always survive and
/// surviving points keep their original `length`.
pub struct Simplify {
    tolerance: f64,
}

impl Simplify {
    /// Creates a new `Simplify` operation with a cosine-similarity threshold.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Executes the simplification in place.
    pub fn execute(&self, cache: &mut PathCache) -> SimplifyStats {
        let mut stats = SimplifyStats::default();
        for section in cache.sections_mut() {
            stats.points_before += section.points.len();
            self.simplify_section(section);
            stats.points_after += section.points.len();
        }
        stats
    }

    /// Single forward pass: `kept.last()` is the cursor point, `candidate`
    /// the interior point under test. A dropped candidate is replaced by the
    /// next point and re-tested against the same cursor.
    fn simplify_section(&self, section: &mut CachedSection) {
        if section.points.len() <= 3 {
            return;
        }

        let points = std::mem::take(&mut section.points);
        let mut kept: Vec<PathPoint> = Vec::with_capacity(points.len());
        kept.push(points[0]);
        let mut cursor = points[0];
        let mut candidate = points[1];

        for &next in &points[2..] {
            let dir0 = normalize_or_zero(&(candidate.pos - cursor.pos));
            let dir1 = normalize_or_zero(&(next.pos - candidate.pos));
            if dir0.dot(&dir1) <= self.tolerance {
                kept.push(candidate);
                cursor = candidate;
            }
            candidate = next;
        }
        kept.push(candidate);

        section.points = kept;
    }
}
