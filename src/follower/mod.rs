//! Waypoint following for path-driven enemies.
//!
//! Path planning and physics are provided by the host: a [`PathService`]
//! answers path queries asynchronously and a [`RigidBody2D`] accepts forces.
//! [`WaypointFollower`] glues them together one tick at a time.

mod config;
mod traits;
mod types;
mod waypoint;

pub use config::FollowerConfig;
pub use traits::{PathService, RigidBody2D};
pub use types::*;
pub use waypoint::WaypointFollower;
