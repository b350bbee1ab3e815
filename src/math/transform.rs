use nalgebra::{Isometry2, Similarity2};

use super::{Point2, Vector2};

/// Mapping between a path's own coordinate space and a host world space.
///
/// Curve math never calls this; it is applied only by the boundary-crossing
/// methods on [`crate::Path`].
pub trait PathTransform {
    /// Maps a point from path space to world space.
    fn to_world(&self, local: &Point2) -> Point2;

    /// Maps a point from world space back into path space.
    fn to_local(&self, world: &Point2) -> Point2;

    /// Maps a direction from path space to world space.
    fn to_world_vector(&self, local: &Vector2) -> Vector2;
}

/// A path that is already authored in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl PathTransform for Identity {
    fn to_world(&self, local: &Point2) -> Point2 {
        *local
    }

    fn to_local(&self, world: &Point2) -> Point2 {
        *world
    }

    fn to_world_vector(&self, local: &Vector2) -> Vector2 {
        *local
    }
}

impl PathTransform for Isometry2<f64> {
    fn to_world(&self, local: &Point2) -> Point2 {
        self.transform_point(local)
    }

    fn to_local(&self, world: &Point2) -> Point2 {
        self.inverse_transform_point(world)
    }

    fn to_world_vector(&self, local: &Vector2) -> Vector2 {
        self.transform_vector(local)
    }
}

impl PathTransform for Similarity2<f64> {
    fn to_world(&self, local: &Point2) -> Point2 {
        self.transform_point(local)
    }

    fn to_local(&self, world: &Point2) -> Point2 {
        self.inverse_transform_point(world)
    }

    fn to_world_vector(&self, local: &Vector2) -> Vector2 {
        self.transform_vector(local)
    }
}
