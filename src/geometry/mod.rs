pub mod control_point;
pub mod curve;

pub use control_point::{ControlPoint, PointKind};
pub use curve::{Curve2, CurveDomain, HermiteSection};
