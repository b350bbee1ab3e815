use serde::{Deserialize, Serialize};

use crate::cache::{DiscretizeSections, PathCache, Simplify};
use crate::config::{validate_tolerance, PathConfig};
use crate::error::{ConfigError, Result, StoreError};
use crate::events::{EventPointTracker, HandlerRef};
use crate::geometry::ControlPoint;
use crate::math::{normalize_or_zero, PathTransform, Point2};
use crate::query::{PathProjection, ProjectToPath, SamplePath, SampleResult};
use crate::store::{ControlPointId, ControlPointStore};

/// A piecewise-cubic path with its derived arc-length cache and event markers.
///
/// Every mutating call rebuilds the cache before returning: discretize,
/// simplify, then rescale events against the previous total length. Queries
/// only read the cache. Use [`Path::batch`] to share one rebuild across
/// several edits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Path {
    store: ControlPointStore,
    config: PathConfig,
    cache: PathCache,
    events: EventPointTracker,
}

impl Path {
    /// Creates an empty path.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(config: PathConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Creates a path from control points in order and builds its cache.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn from_points(
        config: PathConfig,
        points: impl IntoIterator<Item = ControlPoint>,
    ) -> Result<Self> {
        let mut path = Self::new(config)?;
        path.store = ControlPointStore::from_points(points);
        path.rebuild();
        Ok(path)
    }

    // --- Configuration ---

    /// The current configuration.
    #[must_use]
    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    /// Returns whether a closing section joins the last point to the first.
    #[must_use]
    pub fn looped(&self) -> bool {
        self.config.looped
    }

    /// Opens or closes the path and rebuilds.
    pub fn set_looped(&mut self, looped: bool) {
        self.config.looped = looped;
        self.rebuild();
    }

    /// Changes the simplify tolerance and rebuilds.
    ///
    /// # Errors
    ///
    /// Returns an error if `tolerance` is outside `[0, 1)`.
    pub fn set_simplify_tolerance(&mut self, tolerance: f64) -> Result<()> {
        validate_tolerance(tolerance)?;
        self.config.simplify_tolerance = tolerance;
        self.rebuild();
        Ok(())
    }

    /// Changes the per-section sample count and rebuilds.
    ///
    /// # Errors
    ///
    /// Returns an error if `samples` is zero.
    pub fn set_section_samples(&mut self, samples: usize) -> Result<()> {
        if samples == 0 {
            return Err(ConfigError::InvalidSampleCount(samples).into());
        }
        self.config.section_samples = samples;
        self.rebuild();
        Ok(())
    }

    // --- Control points ---

    /// Read access to the control points.
    #[must_use]
    pub fn store(&self) -> &ControlPointStore {
        &self.store
    }

    /// Number of control points.
    #[must_use]
    pub fn count(&self) -> usize {
        self.store.count()
    }

    /// Returns the control point at index `i`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn get(&self, i: usize) -> Result<&ControlPoint> {
        Ok(self.store.get(i)?)
    }

    /// The first control point, if any.
    #[must_use]
    pub fn first_control_point(&self) -> Option<&ControlPoint> {
        self.store.iter().next()
    }

    /// The last control point, if any.
    #[must_use]
    pub fn last_control_point(&self) -> Option<&ControlPoint> {
        self.store.iter().last()
    }

    /// Inserts `point` after the start point of section `section_index`
    /// (appending past the end) and rebuilds.
    pub fn insert(&mut self, section_index: usize, point: ControlPoint) -> ControlPointId {
        let id = self.store.insert(section_index, point);
        self.rebuild();
        id
    }

    /// Appends `point` and rebuilds.
    pub fn push(&mut self, point: ControlPoint) -> ControlPointId {
        let id = self.store.push(point);
        self.rebuild();
        id
    }

    /// Removes the point at index `i` and rebuilds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn remove_at(&mut self, i: usize) -> Result<ControlPoint> {
        let removed = self.store.remove_at(i)?;
        self.rebuild();
        Ok(removed)
    }

    /// Moves point `i` (carrying its handles) and rebuilds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn set_position(&mut self, i: usize, pos: Point2) -> Result<()> {
        self.store.set_position(i, pos)?;
        self.rebuild();
        Ok(())
    }

    /// Sets the incoming handle of point `i` and rebuilds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn set_in_tangent(&mut self, i: usize, pos: Point2) -> Result<()> {
        self.store.set_in_tangent(i, pos)?;
        self.rebuild();
        Ok(())
    }

    /// Sets the outgoing handle of point `i` and rebuilds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn set_out_tangent(&mut self, i: usize, pos: Point2) -> Result<()> {
        self.store.set_out_tangent(i, pos)?;
        self.rebuild();
        Ok(())
    }

    /// Removes every control point and rebuilds (events collapse to length 0).
    pub fn clear_control_points(&mut self) {
        self.store.clear();
        self.rebuild();
    }

    /// Inserts a point where `point` projects onto the path if that
    /// projection is within `capture_radius`; otherwise appends `point`.
    pub fn insert_at_projection(&mut self, point: Point2, capture_radius: f64) -> ControlPointId {
        if self.count() >= 2 {
            if let Some(hit) = self.project_to_path(point) {
                if hit.distance < capture_radius {
                    return self.insert(hit.section_index, ControlPoint::new(hit.pos));
                }
            }
        }
        self.push(ControlPoint::new(point))
    }

    /// Opens an edit scope that defers the rebuild until it is dropped.
    pub fn batch(&mut self) -> BatchEdit<'_> {
        let old_total_length = self.cache.total_length();
        BatchEdit {
            path: self,
            old_total_length,
        }
    }

    // --- Cache ---

    /// The derived arc-length cache.
    #[must_use]
    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    /// Total arc length of the cached path (0 with fewer than two points).
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.cache.total_length()
    }

    /// Rebuilds the cache from the current control points.
    pub fn rebuild(&mut self) {
        let old_total_length = self.cache.total_length();
        self.rebuild_from(old_total_length);
    }

    fn rebuild_from(&mut self, old_total_length: f64) {
        self.cache = DiscretizeSections::new(self.config.section_samples, self.config.looped)
            .execute(&self.store);
        let stats = Simplify::new(self.config.simplify_tolerance).execute(&mut self.cache);
        self.events.rebuild_events(old_total_length, &self.cache);

        tracing::debug!(
            sections = self.cache.section_count(),
            points_before = stats.points_before,
            points_after = stats.points_after,
            total_length = self.cache.total_length(),
            "rebuilt path cache"
        );
    }

    // --- Queries ---

    /// Position and unit tangent at arc length `t` (clamped to the path).
    #[must_use]
    pub fn sample(&self, t: f64) -> SampleResult {
        SamplePath::new(t).execute(&self.cache)
    }

    /// Closest point on the discretized path, or `None` if nothing is cached.
    #[must_use]
    pub fn project_to_path(&self, point: Point2) -> Option<PathProjection> {
        ProjectToPath::new(point).execute(&self.cache)
    }

    // --- Events ---

    /// The event points.
    #[must_use]
    pub fn events(&self) -> &EventPointTracker {
        &self.events
    }

    /// Adds an event at arc length `t`; a no-op returning `None` when the
    /// cache is empty.
    pub fn add_event(&mut self, t: f64, handler: HandlerRef) -> Option<usize> {
        self.events.add_event(t, handler, &self.cache)
    }

    /// Moves event `index` to where `point` projects onto the path.
    ///
    /// Returns `false` if the cache is empty or `index` is out of range.
    pub fn move_event_to(&mut self, index: usize, point: Point2) -> bool {
        match self.project_to_path(point) {
            Some(hit) => self.events.set_position(index, hit.length, hit.pos),
            None => false,
        }
    }

    /// Appends a handler to event `index`.
    pub fn push_handler(&mut self, index: usize, handler: HandlerRef) -> bool {
        self.events.push_handler(index, handler)
    }

    /// Swaps handler `slot` of event `index`, returning the old handler.
    pub fn replace_handler(
        &mut self,
        index: usize,
        slot: usize,
        handler: HandlerRef,
    ) -> Option<HandlerRef> {
        self.events.replace_handler(index, slot, handler)
    }

    /// Clears the handlers of event `index`, destroying the event point.
    pub fn clear_handlers(&mut self, index: usize) -> Option<Vec<HandlerRef>> {
        self.events.clear_handlers(index)
    }

    /// Removes event `index`.
    pub fn remove_event(&mut self, index: usize) -> bool {
        self.events.remove_event(index).is_some()
    }

    /// Removes every event point.
    pub fn clear_event_points(&mut self) {
        self.events.clear();
    }

    // --- World space ---

    /// Returns control point `i` with all positions mapped to world space.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn control_point_world(&self, i: usize, xf: &dyn PathTransform) -> Result<ControlPoint> {
        let cp = self.get(i)?;
        Ok(ControlPoint {
            pos: xf.to_world(&cp.pos),
            in_tangent: xf.to_world(&cp.in_tangent),
            out_tangent: xf.to_world(&cp.out_tangent),
            kind: cp.kind,
        })
    }

    /// [`Path::set_position`] with a world-space target.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn set_position_world(&mut self, i: usize, pos: Point2, xf: &dyn PathTransform) -> Result<()> {
        self.set_position(i, xf.to_local(&pos))
    }

    /// [`Path::set_in_tangent`] with a world-space handle position.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn set_in_tangent_world(
        &mut self,
        i: usize,
        pos: Point2,
        xf: &dyn PathTransform,
    ) -> Result<()> {
        self.set_in_tangent(i, xf.to_local(&pos))
    }

    /// [`Path::set_out_tangent`] with a world-space handle position.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn set_out_tangent_world(
        &mut self,
        i: usize,
        pos: Point2,
        xf: &dyn PathTransform,
    ) -> Result<()> {
        self.set_out_tangent(i, xf.to_local(&pos))
    }

    /// [`Path::sample`] mapped to world space.
    #[must_use]
    pub fn sample_world(&self, t: f64, xf: &dyn PathTransform) -> SampleResult {
        let local = self.sample(t);
        SampleResult {
            pos: xf.to_world(&local.pos),
            tangent: normalize_or_zero(&xf.to_world_vector(&local.tangent)),
        }
    }

    /// [`Path::project_to_path`] for a world-space query; the projected
    /// position and distance are reported in world space.
    #[must_use]
    pub fn project_world(&self, point: Point2, xf: &dyn PathTransform) -> Option<PathProjection> {
        let hit = self.project_to_path(xf.to_local(&point))?;
        let pos = xf.to_world(&hit.pos);
        Some(PathProjection {
            pos,
            distance: (point - pos).norm(),
            ..hit
        })
    }
}

/// Edit scope returned by [`Path::batch`].
///
/// Mutations go straight to the control points; one rebuild runs on drop,
/// rescaling events against the length captured when the scope opened.
#[must_use = "edits are cached when the batch is dropped"]
pub struct BatchEdit<'a> {
    path: &'a mut Path,
    old_total_length: f64,
}

impl BatchEdit<'_> {
    /// Number of control points.
    #[must_use]
    pub fn count(&self) -> usize {
        self.path.store.count()
    }

    /// Returns the control point at index `i`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn get(&self, i: usize) -> std::result::Result<&ControlPoint, StoreError> {
        self.path.store.get(i)
    }

    /// See [`ControlPointStore::insert`].
    pub fn insert(&mut self, section_index: usize, point: ControlPoint) -> ControlPointId {
        self.path.store.insert(section_index, point)
    }

    /// See [`ControlPointStore::push`].
    pub fn push(&mut self, point: ControlPoint) -> ControlPointId {
        self.path.store.push(point)
    }

    /// See [`ControlPointStore::remove_at`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn remove_at(&mut self, i: usize) -> std::result::Result<ControlPoint, StoreError> {
        self.path.store.remove_at(i)
    }

    /// See [`ControlPointStore::set_position`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn set_position(&mut self, i: usize, pos: Point2) -> std::result::Result<(), StoreError> {
        self.path.store.set_position(i, pos)
    }

    /// See [`ControlPointStore::set_in_tangent`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn set_in_tangent(&mut self, i: usize, pos: Point2) -> std::result::Result<(), StoreError> {
        self.path.store.set_in_tangent(i, pos)
    }

    /// See [`ControlPointStore::set_out_tangent`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn set_out_tangent(&mut self, i: usize, pos: Point2) -> std::result::Result<(), StoreError> {
        self.path.store.set_out_tangent(i, pos)
    }

    /// See [`ControlPointStore::replace`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn replace(
        &mut self,
        i: usize,
        point: ControlPoint,
    ) -> std::result::Result<ControlPoint, StoreError> {
        self.path.store.replace(i, point)
    }

    /// Opens or closes the path.
    pub fn set_looped(&mut self, looped: bool) {
        self.path.config.looped = looped;
    }

    /// Removes every control point.
    pub fn clear(&mut self) {
        self.path.store.clear();
    }
}

impl Drop for BatchEdit<'_> {
    fn drop(&mut self) {
        self.path.rebuild_from(self.old_total_length);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::events::{EventHandler, TriggerContext};
    use crate::math::Vector2;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::Similarity2;
    use std::f64::consts::FRAC_PI_2;
    use std::rc::Rc;

    struct Noop;

    impl EventHandler for Noop {
        fn on_triggered(&self, _t: f64, _context: &TriggerContext) {}
    }

    fn open() -> PathConfig {
        PathConfig::default().with_looped(false)
    }

    fn straight_path() -> Path {
        Path::from_points(
            open(),
            [
                ControlPoint::terminal(Point2::new(0.0, 0.0)),
                ControlPoint::terminal(Point2::new(10.0, 0.0)),
            ],
        )
        .unwrap()
    }

    fn s_curve() -> Path {
        Path::from_points(
            open(),
            [
                ControlPoint::terminal(Point2::new(0.0, 0.0))
                    .with_handles(Vector2::zeros(), Vector2::new(6.0, 0.0)),
                ControlPoint::new(Point2::new(10.0, 4.0))
                    .with_handles(Vector2::new(8.0, 0.0), Vector2::new(8.0, 0.0)),
                ControlPoint::terminal(Point2::new(20.0, 0.0))
                    .with_handles(Vector2::new(6.0, 0.0), Vector2::zeros()),
            ],
        )
        .unwrap()
    }

    fn triangle() -> Path {
        Path::from_points(
            PathConfig::default(),
            [
                ControlPoint::new(Point2::new(0.0, 0.0)),
                ControlPoint::new(Point2::new(6.0, 0.0)),
                ControlPoint::new(Point2::new(3.0, 5.0)),
            ],
        )
        .unwrap()
    }

    fn max_step(path: &Path) -> f64 {
        path.cache()
            .sections()
            .iter()
            .flat_map(|s| s.points.windows(2).map(|w| w[1].length - w[0].length))
            .fold(0.0, f64::max)
    }

    #[test]
    fn rejects_invalid_config() {
        assert!(Path::new(PathConfig::default().with_simplify_tolerance(1.5)).is_err());
        let mut path = straight_path();
        assert!(path.set_simplify_tolerance(-1.0).is_err());
        assert!(path.set_section_samples(0).is_err());
    }

    #[test]
    fn straight_segment_scenario() {
        let path = straight_path();
        assert_relative_eq!(path.total_length(), 10.0, epsilon = 1e-9);

        let s = path.sample(5.0);
        assert_relative_eq!(s.pos, Point2::new(5.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(s.tangent, Vector2::new(1.0, 0.0), epsilon = 1e-9);

        let hit = path.project_to_path(Point2::new(5.0, 1.0)).unwrap();
        assert_relative_eq!(hit.length, 5.0, epsilon = 1e-9);
        assert_relative_eq!(hit.pos, Point2::new(5.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(hit.distance, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn endpoints_match_control_points() {
        let path = s_curve();
        assert_relative_eq!(path.sample(0.0).pos, Point2::new(0.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(
            path.sample(path.total_length()).pos,
            Point2::new(20.0, 0.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn looped_triangle_scenario() {
        let path = triangle();
        assert_eq!(path.cache().section_count(), 3);
        let first = path.first_control_point().unwrap().pos;
        assert_relative_eq!(path.sample(0.0).pos, first, epsilon = 1e-9);
        assert_relative_eq!(path.sample(path.total_length()).pos, first, epsilon = 1e-9);
        // Straight sides: 6 + 2·√34.
        assert_relative_eq!(path.total_length(), 6.0 + 2.0 * 34f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn straight_length_is_stable_across_sample_counts() {
        let mut path = straight_path();
        let mut previous = 0.0;
        for samples in [1, 4, 16, 100] {
            path.set_section_samples(samples).unwrap();
            let total = path.total_length();
            assert!(total >= previous - 1e-12);
            assert_relative_eq!(total, 10.0, epsilon = 1e-9);
            previous = total;
        }
    }

    #[test]
    fn simplification_keeps_section_endpoints() {
        let path = s_curve();
        let raw = DiscretizeSections::new(path.config().section_samples, false).execute(path.store());
        assert_eq!(raw.section_count(), path.cache().section_count());
        for (before, after) in raw.sections().iter().zip(path.cache().sections()) {
            assert!(after.points.len() <= before.points.len());
            assert_eq!(after.points.first(), before.points.first());
            assert_eq!(after.points.last(), before.points.last());
        }
    }

    #[test]
    fn sample_then_project_round_trips() {
        let path = s_curve();
        let total = path.total_length();
        let step = max_step(&path);
        for i in 0..=50 {
            let t = total * f64::from(i) / 50.0;
            let hit = path.project_to_path(path.sample(t).pos).unwrap();
            assert!(
                (hit.length - t).abs() <= step,
                "t={t} projected={} step={step}",
                hit.length
            );
        }
    }

    #[test]
    fn uniform_scale_scales_event_positions() {
        let mut path = s_curve();
        path.add_event(3.0, Rc::new(Noop)).unwrap();
        path.add_event(17.5, Rc::new(Noop)).unwrap();
        let before: Vec<f64> = path.events().events().iter().map(|e| e.position_on_path).collect();

        let s = 2.5;
        {
            let mut batch = path.batch();
            for i in 0..batch.count() {
                let cp = *batch.get(i).unwrap();
                batch
                    .replace(
                        i,
                        ControlPoint {
                            pos: cp.pos * s,
                            in_tangent: cp.in_tangent * s,
                            out_tangent: cp.out_tangent * s,
                            kind: cp.kind,
                        },
                    )
                    .unwrap();
            }
        }

        for (event, old) in path.events().events().iter().zip(before) {
            assert_relative_eq!(event.position_on_path, old * s, epsilon = 1e-6);
        }
    }

    #[test]
    fn scale_through_individual_edits_matches_batch() {
        let mut path = s_curve();
        path.add_event(8.0, Rc::new(Noop)).unwrap();
        let s = 0.5;
        for i in 0..path.count() {
            let cp = *path.get(i).unwrap();
            path.set_position(i, cp.pos * s).unwrap();
            path.set_in_tangent(i, cp.in_tangent * s).unwrap();
            path.set_out_tangent(i, cp.out_tangent * s).unwrap();
        }
        assert_relative_eq!(path.events().events()[0].position_on_path, 4.0, epsilon = 1e-6);
    }

    #[test]
    fn insert_then_delete_restores_length() {
        let mut path = s_curve();
        let count = path.count();
        let length = path.total_length();

        path.insert(0, ControlPoint::new(Point2::new(4.0, 7.0)));
        assert_eq!(path.count(), count + 1);
        assert!((path.total_length() - length).abs() > 1e-3);

        path.remove_at(1).unwrap();
        assert_eq!(path.count(), count);
        assert_relative_eq!(path.total_length(), length, epsilon = 1e-9);
    }

    #[test]
    fn fewer_than_two_points_is_degenerate() {
        let mut path = Path::new(open()).unwrap();
        assert!(path.cache().is_empty());
        path.push(ControlPoint::new(Point2::new(1.0, 1.0)));
        assert!(path.cache().is_empty());
        assert_abs_diff_eq!(path.total_length(), 0.0);
        assert_eq!(path.sample(1.0), SampleResult::default());
        assert!(path.project_to_path(Point2::origin()).is_none());
        assert!(path.add_event(0.0, Rc::new(Noop)).is_none());
        assert!(path.events().is_empty());
    }

    #[test]
    fn out_of_range_edits_fail() {
        let mut path = straight_path();
        assert!(matches!(
            path.set_position(9, Point2::origin()),
            Err(crate::PathError::Store(StoreError::IndexOutOfRange { index: 9, len: 2 }))
        ));
        assert!(path.remove_at(2).is_err());
        assert!(path.get(2).is_err());
    }

    #[test]
    fn toggling_loop_rebuilds() {
        let mut path = triangle();
        path.set_looped(false);
        assert_eq!(path.cache().section_count(), 2);
        path.set_looped(true);
        assert_eq!(path.cache().section_count(), 3);
    }

    #[test]
    fn clear_control_points_collapses_events() {
        let mut path = straight_path();
        path.add_event(5.0, Rc::new(Noop)).unwrap();
        path.clear_control_points();
        assert!(path.cache().is_empty());
        assert_eq!(path.events().len(), 1);
        assert_abs_diff_eq!(path.events().events()[0].position_on_path, 0.0);

        path.clear_event_points();
        assert!(path.events().is_empty());
    }

    #[test]
    fn batch_defers_rebuild_until_drop() {
        let mut path = straight_path();
        {
            let mut batch = path.batch();
            batch.push(ControlPoint::terminal(Point2::new(10.0, 10.0)));
            batch.set_position(1, Point2::new(10.0, 0.0)).unwrap();
            batch.set_looped(false);
        }
        assert_eq!(path.cache().section_count(), 2);
        assert!(path.total_length() > 10.0);
    }

    #[test]
    fn move_event_projects_onto_path() {
        let mut path = straight_path();
        path.add_event(1.0, Rc::new(Noop)).unwrap();
        assert!(path.move_event_to(0, Point2::new(7.0, -2.0)));
        let event = &path.events().events()[0];
        assert_relative_eq!(event.position_on_path, 7.0, epsilon = 1e-9);
        assert_relative_eq!(event.cached_position, Point2::new(7.0, 0.0), epsilon = 1e-9);
        assert!(!path.move_event_to(4, Point2::origin()));
    }

    #[test]
    fn insert_at_projection_splits_nearby_section() {
        let mut path = straight_path();
        path.insert_at_projection(Point2::new(4.0, 0.2), 0.5);
        assert_eq!(path.count(), 3);
        assert_relative_eq!(path.get(1).unwrap().pos, Point2::new(4.0, 0.0), epsilon = 1e-9);

        path.insert_at_projection(Point2::new(4.0, 8.0), 0.5);
        assert_eq!(path.count(), 4);
        assert_relative_eq!(path.get(3).unwrap().pos, Point2::new(4.0, 8.0));
    }

    #[test]
    fn control_point_boundary_samples_the_next_section() {
        let path = Path::from_points(
            open(),
            [
                ControlPoint::terminal(Point2::new(0.0, 0.0)),
                ControlPoint::new(Point2::new(10.0, 0.0)),
                ControlPoint::terminal(Point2::new(10.0, 10.0)),
            ],
        )
        .unwrap();

        let s = path.sample(10.0);
        assert_relative_eq!(s.pos, Point2::new(10.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(s.tangent, Vector2::new(0.0, 1.0), epsilon = 1e-9);
    }

    #[test]
    fn world_space_calls_use_the_transform() {
        let xf = Similarity2::new(Vector2::new(100.0, 0.0), FRAC_PI_2, 2.0);
        let mut path = straight_path();

        let world = path.sample_world(5.0, &xf);
        assert_relative_eq!(world.pos, Point2::new(100.0, 10.0), epsilon = 1e-9);
        assert_relative_eq!(world.tangent, Vector2::new(0.0, 1.0), epsilon = 1e-9);

        let hit = path.project_world(Point2::new(98.0, 10.0), &xf).unwrap();
        assert_relative_eq!(hit.length, 5.0, epsilon = 1e-9);
        assert_relative_eq!(hit.distance, 2.0, epsilon = 1e-9);

        path.set_position_world(1, Point2::new(100.0, 40.0), &xf).unwrap();
        assert_relative_eq!(path.get(1).unwrap().pos, Point2::new(20.0, 0.0), epsilon = 1e-9);
        let cp = path.control_point_world(1, &xf).unwrap();
        assert_relative_eq!(cp.pos, Point2::new(100.0, 40.0), epsilon = 1e-9);
    }

    #[test]
    fn persisted_shape_round_trips() {
        let mut path = s_curve();
        path.add_event(2.0, Rc::new(Noop)).unwrap();
        let json = serde_json::to_string(&path).unwrap();
        let restored: Path = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.count(), path.count());
        assert_eq!(restored.cache(), path.cache());
        assert_eq!(restored.events().len(), 1);
        assert!(restored.events().events()[0].handlers.is_empty());
    }

    #[test]
    fn restoring_an_invalid_config_fails() {
        let mut value = serde_json::to_value(s_curve()).unwrap();
        value["config"]["simplify_tolerance"] = serde_json::json!(-1.0);
        assert!(serde_json::from_value::<Path>(value.clone()).is_err());

        value["config"]["simplify_tolerance"] = serde_json::json!(0.5);
        value["config"]["section_samples"] = serde_json::json!(0);
        assert!(serde_json::from_value::<Path>(value).is_err());
    }
}
