use serde::{Deserialize, Serialize};

use crate::cache::{CachedSection, PathCache};
use crate::math::segment_2d::project_point_to_segment;
use crate::math::Point2;

/// Closest point within one cached section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionProjection {
    /// Index of the winning segment (`points[i] → points[i + 1]`).
    pub segment_index: usize,
    /// The projected point.
    pub pos: Point2,
    /// Arc length of the projected point from the path start.
    pub length: f64,
    /// Distance from the query point to `pos`.
    pub distance: f64,
}

/// Closest point on the whole discretized path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathProjection {
    pub section_index: usize,
    pub segment_index: usize,
    pub pos: Point2,
    pub length: f64,
    pub distance: f64,
}

/// Projects a point onto a single cached section.
pub struct ProjectToSection {
    point: Point2,
}

impl ProjectToSection {
    /// Creates a new `ProjectToSection` query.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self { point }
    }

    /// Executes the query against `section`.
    ///
    /// Every segment is tested; the first segment at the minimum distance wins.
    /// The returned length is the section's starting length plus the chord
    /// lengths of the preceding segments plus the partial winning segment.
    /// Sections with fewer than two points yield `None`.
    #[must_use]
    pub fn execute(&self, section: &CachedSection) -> Option<SectionProjection> {
        let start_length = section.starting_length();
        let mut accumulated = 0.0;
        let mut best: Option<SectionProjection> = None;

        for (j, pair) in section.points.windows(2).enumerate() {
            let (a, b) = (&pair[0].pos, &pair[1].pos);
            let segment_length = (b - a).norm();
            let proj = project_point_to_segment(&self.point, a, b);

            if best.is_none_or(|cur| proj.distance < cur.distance) {
                best = Some(SectionProjection {
                    segment_index: j,
                    pos: proj.point,
                    length: start_length + accumulated + proj.t * segment_length,
                    distance: proj.distance,
                });
            }
            accumulated += segment_length;
        }

        best
    }
}

/// Projects a point onto the closest segment of the whole path.
pub struct ProjectToPath {
    point: Point2,
}

impl ProjectToPath {
    /// Creates a new `ProjectToPath` query.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self { point }
    }

    /// Executes the query with a linear scan over every section.
    ///
    /// Returns `None` when the cache is empty; callers must handle that
    /// before using the result.
    #[must_use]
    pub fn execute(&self, cache: &PathCache) -> Option<PathProjection> {
        let section_query = ProjectToSection::new(self.point);
        let mut best: Option<PathProjection> = None;

        for (i, section) in cache.sections().iter().enumerate() {
            let Some(hit) = section_query.execute(section) else {
                continue;
            };
            if best.is_none_or(|cur| hit.distance < cur.distance) {
                best = Some(PathProjection {
                    section_index: i,
                    segment_index: hit.segment_index,
                    pos: hit.pos,
                    length: hit.length,
                    distance: hit.distance,
                });
            }
        }

        best
    }
}
