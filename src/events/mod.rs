use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::cache::PathCache;
use crate::math::{Point2, Vector2, LENGTH_EPSILON};
use crate::query::SamplePath;

/// What a follower passes to handlers when it crosses an event point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerContext {
    /// Index of the event point being crossed.
    pub event_index: usize,
    /// Arc length stored in the event point.
    pub position_on_path: f64,
    /// Follower position at the current cursor.
    pub pos: Point2,
    /// Follower unit tangent at the current cursor.
    pub tangent: Vector2,
}

/// Capability implemented by host-owned event handlers.
pub trait EventHandler {
    /// Called once each time a follower's cursor crosses the owning event point.
    fn on_triggered(&self, t: f64, context: &TriggerContext);
}

/// Shared reference to a host-owned handler.
pub type HandlerRef = Rc<dyn EventHandler>;

/// A marker at an arc length, carrying host-owned handlers.
#[derive(Clone, Serialize, Deserialize)]
pub struct EventPoint {
    pub position_on_path: f64,
    pub cached_position: Point2,
    #[serde(skip)]
    pub handlers: Vec<HandlerRef>,
}

impl fmt::Debug for EventPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventPoint")
            .field("position_on_path", &self.position_on_path)
            .field("cached_position", &self.cached_position)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl EventPoint {
    /// Invokes every handler once, in order.
    pub fn trigger(&self, t: f64, context: &TriggerContext) {
        for handler in &self.handlers {
            handler.on_triggered(t, context);
        }
    }
}

/// Keeps event markers proportionally placed as the path length changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPointTracker {
    events: Vec<EventPoint>,
}

impl EventPointTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The event points in creation order.
    #[must_use]
    pub fn events(&self) -> &[EventPoint] {
        &self.events
    }

    /// Returns the event point at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&EventPoint> {
        self.events.get(index)
    }

    /// Number of event points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns whether there are no event points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Rescales every event to the same fraction of the new total length and
    /// re-samples its cached position.
    ///
    /// `old_total_length` is floored at [`LENGTH_EPSILON`].
    pub fn rebuild_events(&mut self, old_total_length: f64, cache: &PathCache) {
        let old_length = old_total_length.max(LENGTH_EPSILON);
        let new_length = cache.total_length();
        for event in &mut self.events {
            let fraction = (event.position_on_path / old_length).clamp(0.0, 1.0);
            event.position_on_path = fraction * new_length;
            event.cached_position = SamplePath::new(event.position_on_path).execute(cache).pos;
        }
        tracing::trace!(
            events = self.events.len(),
            old_length,
            new_length,
            "rescaled event points"
        );
    }

    /// Adds an event at arc length `t` with a single handler.
    ///
    /// Returns the new event's index, or `None` (and does nothing) when no
    /// cached section contains `t`.
    pub fn add_event(&mut self, t: f64, handler: HandlerRef, cache: &PathCache) -> Option<usize> {
        if cache.section_by_length(t).is_none() {
            return None;
        }
        let t = t.clamp(0.0, cache.total_length());
        self.events.push(EventPoint {
            position_on_path: t,
            cached_position: SamplePath::new(t).execute(cache).pos,
            handlers: vec![handler],
        });
        Some(self.events.len() - 1)
    }

    /// Moves an event to a new arc length and refreshes its cached position.
    ///
    /// Returns `false` if `index` is out of range.
    pub fn set_position(&mut self, index: usize, t: f64, pos: Point2) -> bool {
        let Some(event) = self.events.get_mut(index) else {
            return false;
        };
        event.position_on_path = t;
        event.cached_position = pos;
        true
    }

    /// Appends another handler to an existing event.
    ///
    /// Returns `false` if `index` is out of range.
    pub fn push_handler(&mut self, index: usize, handler: HandlerRef) -> bool {
        let Some(event) = self.events.get_mut(index) else {
            return false;
        };
        event.handlers.push(handler);
        true
    }

    /// Swaps the handler in `slot` of event `index`, returning the old one.
    pub fn replace_handler(
        &mut self,
        index: usize,
        slot: usize,
        handler: HandlerRef,
    ) -> Option<HandlerRef> {
        let current = self.events.get_mut(index)?.handlers.get_mut(slot)?;
        Some(std::mem::replace(current, handler))
    }

    /// Clears an event's handler list, which also destroys the event point.
    pub fn clear_handlers(&mut self, index: usize) -> Option<Vec<HandlerRef>> {
        self.remove_event(index).map(|event| event.handlers)
    }

    /// Removes and returns the event at `index`.
    pub fn remove_event(&mut self, index: usize) -> Option<EventPoint> {
        (index < self.events.len()).then(|| self.events.remove(index))
    }

    /// Drops every event point and its handler references.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Events whose position lies in the half-open window `[from, to)`.
    pub fn in_window(&self, from: f64, to: f64) -> impl Iterator<Item = (usize, &EventPoint)> + '_ {
        self.events
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.position_on_path >= from && e.position_on_path < to)
    }
}
