use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::error::StoreError;
use crate::geometry::ControlPoint;
use crate::math::Point2;

slotmap::new_key_type! {
    /// Stable identifier for a control point.
    ///
    /// Survives insertion and deletion of other points, unlike the point's index.
    pub struct ControlPointId;
}

/// Ordered, index-addressable collection of control points.
///
/// Points live in a generational arena; `order` holds the path order.
/// The store itself never rebuilds any cache; [`crate::Path`] wraps every
/// mutation with a rebuild.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ControlPointStore {
    points: SlotMap<ControlPointId, ControlPoint>,
    order: Vec<ControlPointId>,
}

impl ControlPointStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `points` in order.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = ControlPoint>) -> Self {
        let mut store = Self::new();
        for cp in points {
            store.push(cp);
        }
        store
    }

    /// Number of control points.
    #[must_use]
    pub fn count(&self) -> usize {
        self.order.len()
    }

    /// Returns whether the store holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the control point at index `i`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn get(&self, i: usize) -> Result<&ControlPoint, StoreError> {
        let id = self.id_at(i)?;
        self.get_by_id(id)
    }

    /// Returns the stable id of the point at index `i`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn id_at(&self, i: usize) -> Result<ControlPointId, StoreError> {
        self.order
            .get(i)
            .copied()
            .ok_or(StoreError::IndexOutOfRange {
                index: i,
                len: self.order.len(),
            })
    }

    /// Returns the current index of the point with the given id, if it still exists.
    #[must_use]
    pub fn index_of(&self, id: ControlPointId) -> Option<usize> {
        if !self.points.contains_key(id) {
            return None;
        }
        self.order.iter().position(|&other| other == id)
    }

    /// Returns the control point with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StaleId`] if the point has been removed.
    pub fn get_by_id(&self, id: ControlPointId) -> Result<&ControlPoint, StoreError> {
        self.points.get(id).ok_or(StoreError::StaleId)
    }

    /// Iterates over the points in path order.
    pub fn iter(&self) -> impl Iterator<Item = &ControlPoint> + '_ {
        self.order.iter().filter_map(|&id| self.points.get(id))
    }

    /// Iterates over adjacent point pairs: `(0,1) … (n-2,n-1)`, plus
    /// `(n-1,0)` when `looped`. Yields nothing for fewer than two points.
    pub fn pairs(
        &self,
        looped: bool,
    ) -> impl Iterator<Item = (&ControlPoint, &ControlPoint)> + '_ {
        let n = self.order.len();
        let section_count = match n {
            0 | 1 => 0,
            _ if looped => n,
            _ => n - 1,
        };
        (0..section_count).filter_map(move |i| {
            let a = self.points.get(self.order[i])?;
            let b = self.points.get(self.order[(i + 1) % n])?;
            Some((a, b))
        })
    }

    /// Appends a point at the end of the path.
    pub fn push(&mut self, point: ControlPoint) -> ControlPointId {
        let id = self.points.insert(point);
        self.order.push(id);
        id
    }

    /// Inserts `point` right after the start point of section `section_index`,
    /// or appends it if that section is the last one or past the end.
    pub fn insert(&mut self, section_index: usize, point: ControlPoint) -> ControlPointId {
        let id = self.points.insert(point);
        if section_index + 1 < self.order.len() {
            self.order.insert(section_index + 1, id);
        } else {
            self.order.push(id);
        }
        id
    }

    /// Removes and returns the point at index `i`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn remove_at(&mut self, i: usize) -> Result<ControlPoint, StoreError> {
        let id = self.id_at(i)?;
        self.order.remove(i);
        self.points.remove(id).ok_or(StoreError::StaleId)
    }

    /// Removes every point.
    pub fn clear(&mut self) {
        self.points.clear();
        self.order.clear();
    }

    /// Moves point `i` to `pos`, carrying both handles along.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn set_position(&mut self, i: usize, pos: Point2) -> Result<(), StoreError> {
        self.point_mut(i)?.translate_to(pos);
        Ok(())
    }

    /// Sets the absolute position of the incoming handle of point `i`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn set_in_tangent(&mut self, i: usize, pos: Point2) -> Result<(), StoreError> {
        self.point_mut(i)?.in_tangent = pos;
        Ok(())
    }

    /// Sets the absolute position of the outgoing handle of point `i`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn set_out_tangent(&mut self, i: usize, pos: Point2) -> Result<(), StoreError> {
        self.point_mut(i)?.out_tangent = pos;
        Ok(())
    }

    /// Replaces the point at index `i` wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `i >= count()`.
    pub fn replace(&mut self, i: usize, point: ControlPoint) -> Result<ControlPoint, StoreError> {
        Ok(std::mem::replace(self.point_mut(i)?, point))
    }

    fn point_mut(&mut self, i: usize) -> Result<&mut ControlPoint, StoreError> {
        let id = self.id_at(i)?;
        self.points.get_mut(id).ok_or(StoreError::StaleId)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector2;
    use approx::assert_relative_eq;

    #[allow(clippy::cast_precision_loss)]
    fn line_store(n: usize) -> ControlPointStore {
        ControlPointStore::from_points((0..n).map(|i| ControlPoint::new(Point2::new(i as f64, 0.0))))
    }

    #[test]
    fn get_out_of_range_fails() {
        let mut store = line_store(2);
        assert_eq!(
            store.get(2).unwrap_err(),
            StoreError::IndexOutOfRange { index: 2, len: 2 }
        );
        assert!(store.set_position(5, Point2::origin()).is_err());
    }

    #[test]
    fn insert_places_after_section_start() {
        let mut store = line_store(3);
        store.insert(0, ControlPoint::new(Point2::new(0.5, 1.0)));
        assert_eq!(store.count(), 4);
        assert_relative_eq!(store.get(1).unwrap().pos, Point2::new(0.5, 1.0));
        assert_relative_eq!(store.get(2).unwrap().pos, Point2::new(1.0, 0.0));
    }

    #[test]
    fn insert_past_end_appends() {
        let mut store = line_store(3);
        store.insert(2, ControlPoint::new(Point2::new(9.0, 9.0)));
        store.insert(100, ControlPoint::new(Point2::new(7.0, 7.0)));
        assert_relative_eq!(store.get(3).unwrap().pos, Point2::new(9.0, 9.0));
        assert_relative_eq!(store.get(4).unwrap().pos, Point2::new(7.0, 7.0));

        let mut empty = ControlPointStore::new();
        empty.insert(0, ControlPoint::new(Point2::origin()));
        assert_eq!(empty.count(), 1);
    }

    #[test]
    fn set_position_keeps_handle_offsets() {
        let mut store = ControlPointStore::new();
        store.push(
            ControlPoint::new(Point2::new(1.0, 1.0))
                .with_handles(Vector2::new(-1.0, 0.0), Vector2::new(1.0, 0.0)),
        );
        store.set_position(0, Point2::new(5.0, 5.0)).unwrap();
        let cp = store.get(0).unwrap();
        assert_relative_eq!(cp.in_tangent, Point2::new(4.0, 5.0));
        assert_relative_eq!(cp.out_tangent, Point2::new(6.0, 5.0));
    }

    #[test]
    fn tangent_setters_are_absolute() {
        let mut store = line_store(1);
        store.set_in_tangent(0, Point2::new(-2.0, 3.0)).unwrap();
        store.set_out_tangent(0, Point2::new(2.0, 3.0)).unwrap();
        let cp = store.get(0).unwrap();
        assert_relative_eq!(cp.in_vector(), Vector2::new(-2.0, 3.0));
        assert_relative_eq!(cp.out_vector(), Vector2::new(2.0, 3.0));
    }

    #[test]
    fn ids_survive_reordering() {
        let mut store = line_store(3);
        let last = store.id_at(2).unwrap();
        store.insert(0, ControlPoint::new(Point2::new(0.5, 0.0)));
        assert_eq!(store.index_of(last), Some(3));

        let first = store.id_at(0).unwrap();
        store.remove_at(0).unwrap();
        assert_eq!(store.index_of(first), None);
        assert_eq!(store.get_by_id(first).unwrap_err(), StoreError::StaleId);
        assert_eq!(store.index_of(last), Some(2));
    }

    #[test]
    fn pairs_open_and_looped() {
        let store = line_store(3);
        assert_eq!(store.pairs(false).count(), 2);
        assert_eq!(store.pairs(true).count(), 3);
        let (a, b) = store.pairs(true).last().unwrap();
        assert_relative_eq!(a.pos, Point2::new(2.0, 0.0));
        assert_relative_eq!(b.pos, Point2::new(0.0, 0.0));

        assert_eq!(line_store(1).pairs(true).count(), 0);
        assert_eq!(line_store(0).pairs(false).count(), 0);
    }

    #[test]
    fn remove_returns_point() {
        let mut store = line_store(2);
        let removed = store.remove_at(1).unwrap();
        assert_relative_eq!(removed.pos, Point2::new(1.0, 0.0));
        assert_eq!(store.count(), 1);
        assert!(store.remove_at(1).is_err());
    }
}
