pub mod segment_2d;
pub mod transform;

pub use transform::{Identity, PathTransform};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Floor applied to a previous path length before event positions are
/// rescaled against it.
pub const LENGTH_EPSILON: f64 = 1e-4;

/// Returns `v` scaled to unit length, or the zero vector if `v` is degenerate.
#[must_use]
pub fn normalize_or_zero(v: &Vector2) -> Vector2 {
    v.try_normalize(TOLERANCE).unwrap_or_else(Vector2::zeros)
}
