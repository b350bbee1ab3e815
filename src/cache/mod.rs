mod discretize;
mod simplify;

pub use discretize::DiscretizeSections;
pub use simplify::{Simplify, SimplifyStats};

use serde::{Deserialize, Serialize};

use crate::math::Point2;

/// A discretized point tagged with its cumulative arc length from the path start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub pos: Point2,
    pub length: f64,
}

impl PathPoint {
    /// Creates a new path point.
    #[must_use]
    pub fn new(pos: Point2, length: f64) -> Self {
        Self { pos, length }
    }
}

/// Piecewise-linear discretization of one section.
///
/// Lengths are non-decreasing within the section and continue from the
/// previous section's ending length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CachedSection {
    pub points: Vec<PathPoint>,
}

impl CachedSection {
    /// Creates a section from already length-tagged points.
    #[must_use]
    pub fn new(points: Vec<PathPoint>) -> Self {
        Self { points }
    }

    /// Arc length at the first point, or 0 for an empty section.
    #[must_use]
    pub fn starting_length(&self) -> f64 {
        self.points.first().map_or(0.0, |p| p.length)
    }

    /// Arc length at the last point, or 0 for an empty section.
    #[must_use]
    pub fn ending_length(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.length)
    }

    /// Returns whether `t` lies in `[starting_length, ending_length]`.
    #[must_use]
    pub fn brackets(&self, t: f64) -> bool {
        !self.points.is_empty() && t >= self.starting_length() && t <= self.ending_length()
    }

    /// Number of line segments in the section.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// The derived discretization of a whole path.
///
/// Either empty or an exact reflection of the control points it was built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathCache {
    sections: Vec<CachedSection>,
}

impl PathCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps already-built sections.
    #[must_use]
    pub fn from_sections(sections: Vec<CachedSection>) -> Self {
        Self { sections }
    }

    /// The cached sections in path order.
    #[must_use]
    pub fn sections(&self) -> &[CachedSection] {
        &self.sections
    }

    pub(crate) fn sections_mut(&mut self) -> &mut [CachedSection] {
        &mut self.sections
    }

    /// Returns whether no sections are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of cached sections.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Total number of cached points across all sections.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.sections.iter().map(|s| s.points.len()).sum()
    }

    /// Arc length of the whole path: the last point of the last section, or 0.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.sections.last().map_or(0.0, CachedSection::ending_length)
    }

    /// Finds the section whose length range brackets `t`, after clamping `t`
    /// to `[0, total_length]`. A length shared by two sections resolves to
    /// the later one.
    #[must_use]
    pub fn section_by_length(&self, t: f64) -> Option<(usize, &CachedSection)> {
        let t = t.clamp(0.0, self.total_length());
        self.sections
            .iter()
            .enumerate()
            .rfind(|(_, section)| section.brackets(t))
    }
}
