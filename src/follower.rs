use crate::events::TriggerContext;
use crate::path::Path;
use crate::query::SampleResult;

/// Drives an arc-length cursor along a path and fires event handlers.
///
/// Each step fires every event whose position lies in `[previous_t, current_t)`.
/// Nothing stronger is guaranteed: a cursor that moves backwards fires nothing,
/// and an event is delivered at most once per crossing window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathFollower {
    /// Arc length advanced per unit of elapsed time.
    pub speed: f64,
    /// Arc length at elapsed time zero.
    pub start_offset: f64,
    previous_t: f64,
}

impl Default for PathFollower {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

impl PathFollower {
    /// Creates a follower with the given speed and start offset.
    #[must_use]
    pub fn new(speed: f64, start_offset: f64) -> Self {
        Self {
            speed,
            start_offset,
            previous_t: 0.0,
        }
    }

    /// Cursor value at `elapsed` time units since the follower started.
    #[must_use]
    pub fn cursor(&self, elapsed: f64) -> f64 {
        self.speed * elapsed + self.start_offset
    }

    /// The cursor value of the previous step.
    #[must_use]
    pub fn previous_t(&self) -> f64 {
        self.previous_t
    }

    /// Prepares `path` for following, building its cache if a restored path
    /// arrived without one.
    pub fn start(&mut self, path: &mut Path) {
        if path.cache().is_empty() && path.count() >= 2 {
            tracing::warn!(
                control_points = path.count(),
                "path was not cached before following; rebuilding"
            );
            path.rebuild();
        }
        self.reset();
    }

    /// Rewinds the previous cursor to zero.
    pub fn reset(&mut self) {
        self.previous_t = 0.0;
    }

    /// Advances to `elapsed`, samples the path and triggers every event in
    /// `[previous_t, current_t)`.
    pub fn advance(&mut self, path: &Path, elapsed: f64) -> SampleResult {
        let current_t = self.cursor(elapsed);
        let sample = path.sample(current_t);

        for (event_index, event) in path.events().in_window(self.previous_t, current_t) {
            let context = TriggerContext {
                event_index,
                position_on_path: event.position_on_path,
                pos: sample.pos,
                tangent: sample.tangent,
            };
            event.trigger(current_t, &context);
        }

        self.previous_t = current_t;
        sample
    }
}
