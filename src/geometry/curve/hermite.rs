use crate::error::{GeometryError, Result};
use crate::geometry::ControlPoint;
use crate::math::{Point2, Vector2};

use super::{Curve2, CurveDomain};

/// Evaluates the two-point Hermite blend between `p0` and `p1` at `t`.
///
/// ```text
/// pos(t) = (2t³ − 3t² + 1)·p0.pos + (t³ − 2t² + t)·out0·k0
///        + (−2t³ + 3t²)·p1.pos     + (t³ − t²)·in1·k1
/// ```
///
/// `out0 = p0.out_tangent − p0.pos`, `in1 = p1.in_tangent − p1.pos`, and
/// `k` is 0 for a `Terminal` point, 1 otherwise. `t` is not range-checked.
#[must_use]
pub fn evaluate(p0: &ControlPoint, p1: &ControlPoint, t: f64) -> Point2 {
    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    Point2::from(
        p0.pos.coords * h00
            + p0.out_vector() * (h10 * p0.tangent_weight())
            + p1.pos.coords * h01
            + p1.in_vector() * (h11 * p1.tangent_weight()),
    )
}

/// Derivative of [`evaluate`] with respect to `t`.
#[must_use]
pub fn derivative(p0: &ControlPoint, p1: &ControlPoint, t: f64) -> Vector2 {
    let t2 = t * t;

    let d00 = 6.0 * t2 - 6.0 * t;
    let d10 = 3.0 * t2 - 4.0 * t + 1.0;
    let d01 = -6.0 * t2 + 6.0 * t;
    let d11 = 3.0 * t2 - 2.0 * t;

    p0.pos.coords * d00
        + p0.out_vector() * (d10 * p0.tangent_weight())
        + p1.pos.coords * d01
        + p1.in_vector() * (d11 * p1.tangent_weight())
}

/// The curve between two adjacent control points, parameterized on `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct HermiteSection<'a> {
    start: &'a ControlPoint,
    end: &'a ControlPoint,
}

impl<'a> HermiteSection<'a> {
    /// Creates a section from `start` to `end`.
    #[must_use]
    pub fn new(start: &'a ControlPoint, end: &'a ControlPoint) -> Self {
        Self { start, end }
    }

    /// Returns the start control point.
    #[must_use]
    pub fn start(&self) -> &ControlPoint {
        self.start
    }

    /// Returns the end control point.
    #[must_use]
    pub fn end(&self) -> &ControlPoint {
        self.end
    }

    fn check(&self, t: f64) -> Result<()> {
        let domain = self.domain();
        if domain.contains(t) {
            Ok(())
        } else {
            Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: domain.t_min,
                max: domain.t_max,
            }
            .into())
        }
    }
}

impl Curve2 for HermiteSection<'_> {
    fn evaluate(&self, t: f64) -> Result<Point2> {
        self.check(t)?;
        Ok(evaluate(self.start, self.end, t))
    }

    fn tangent(&self, t: f64) -> Result<Vector2> {
        self.check(t)?;
        Ok(derivative(self.start, self.end, t))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    fn is_closed(&self) -> bool {
        false
    }
}
