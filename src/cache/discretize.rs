use crate::geometry::curve::evaluate;
use crate::geometry::ControlPoint;
use crate::store::ControlPointStore;

use super::{CachedSection, PathCache, PathPoint};

/// Discretizes every section of a path into length-tagged polylines.
pub struct DiscretizeSections {
    samples: usize,
    looped: bool,
}

impl DiscretizeSections {
    /// Creates a new `DiscretizeSections` operation.
    ///
    /// `samples` is the number of equal parameter steps per section; each
    /// section gets `samples + 1` points including both endpoints.
    #[must_use]
    pub fn new(samples: usize, looped: bool) -> Self {
        Self {
            samples: samples.max(1),
            looped,
        }
    }

    /// Executes the discretization.
    ///
    /// Produces one section per adjacent control-point pair (plus the
    /// wraparound pair when looped). Fewer than two points yield an empty cache.
    #[must_use]
    pub fn execute(&self, store: &ControlPointStore) -> PathCache {
        let mut base_length = 0.0;
        let sections = store
            .pairs(self.looped)
            .map(|(a, b)| {
                let section = self.sample_section(a, b, base_length);
                base_length = section.ending_length();
                section
            })
            .collect();
        PathCache::from_sections(sections)
    }

    fn sample_section(&self, a: &ControlPoint, b: &ControlPoint, base_length: f64) -> CachedSection {
        let mut points: Vec<PathPoint> = Vec::with_capacity(self.samples + 1);
        let mut length = base_length;

        #[allow(clippy::cast_precision_loss)]
        let step = 1.0 / self.samples as f64;
        for i in 0..=self.samples {
            #[allow(clippy::cast_precision_loss)]
            let pos = evaluate(a, b, i as f64 * step);
            if let Some(prev) = points.last() {
                length += (pos - prev.pos).norm();
            }
            points.push(PathPoint::new(pos, length));
        }

        CachedSection::new(points)
    }
}
