use serde::{Deserialize, Serialize};

use crate::math::{Point2, Vector2};

/// Classification of a control point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointKind {
    /// Interior point whose handles shape the neighbouring sections.
    #[default]
    Curve,
    /// Endpoint of an open path: its handles contribute no tangent influence.
    Terminal,
}

/// An authored anchor with two tangent handles.
///
/// Handles are stored as absolute positions in path space; the effective
/// handle vector is the offset from `pos`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub pos: Point2,
    pub in_tangent: Point2,
    pub out_tangent: Point2,
    pub kind: PointKind,
}

impl ControlPoint {
    /// Creates a `Curve` point whose handles coincide with `pos`.
    #[must_use]
    pub fn new(pos: Point2) -> Self {
        Self {
            pos,
            in_tangent: pos,
            out_tangent: pos,
            kind: PointKind::Curve,
        }
    }

    /// Creates a `Terminal` point whose handles coincide with `pos`.
    #[must_use]
    pub fn terminal(pos: Point2) -> Self {
        Self {
            kind: PointKind::Terminal,
            ..Self::new(pos)
        }
    }

    /// Sets both handles from offsets relative to `pos`.
    #[must_use]
    pub fn with_handles(mut self, in_offset: Vector2, out_offset: Vector2) -> Self {
        self.in_tangent = self.pos + in_offset;
        self.out_tangent = self.pos + out_offset;
        self
    }

    /// Sets the point kind.
    #[must_use]
    pub fn with_kind(mut self, kind: PointKind) -> Self {
        self.kind = kind;
        self
    }

    /// Effective incoming handle vector (`in_tangent - pos`).
    ///
    /// A section ending at this point arrives with this velocity.
    #[must_use]
    pub fn in_vector(&self) -> Vector2 {
        self.in_tangent - self.pos
    }

    /// Effective outgoing handle vector (`out_tangent - pos`).
    #[must_use]
    pub fn out_vector(&self) -> Vector2 {
        self.out_tangent - self.pos
    }

    /// Moves the point, translating both handles by the same delta.
    pub fn translate_to(&mut self, pos: Point2) {
        let in_offset = self.in_vector();
        let out_offset = self.out_vector();
        self.pos = pos;
        self.in_tangent = pos + in_offset;
        self.out_tangent = pos + out_offset;
    }

    /// Tangent weight: 0 for `Terminal`, 1 for `Curve`.
    #[must_use]
    pub fn tangent_weight(&self) -> f64 {
        match self.kind {
            PointKind::Curve => 1.0,
            PointKind::Terminal => 0.0,
        }
    }
}
