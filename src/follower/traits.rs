use glam::Vec2;

use super::types::PathResult;
use crate::libs::pending::Pending;

/// An external path planner.
///
/// Implementations answer each query through the returned handle, typically
/// from a worker that finishes some ticks later.
pub trait PathService {
    fn start_path(&mut self, origin: Vec2, destination: Vec2) -> Pending<PathResult>;
}

/// The physics body a follower steers.
pub trait RigidBody2D {
    fn position(&self) -> Vec2;

    /// Adds `force` to the forces integrated on the next physics step.
    fn add_force(&mut self, force: Vec2);
}
