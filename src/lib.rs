pub mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod follower;
pub mod geometry;
pub mod math;
pub mod path;
pub mod query;
pub mod store;

pub use config::PathConfig;
pub use error::{PathError, Result};
pub use events::{EventHandler, EventPoint, HandlerRef, TriggerContext};
pub use follower::PathFollower;
pub use geometry::{ControlPoint, PointKind};
pub use path::{BatchEdit, Path};
pub use query::{PathProjection, SampleResult};
pub use store::ControlPointId;
