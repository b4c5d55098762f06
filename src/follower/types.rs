use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An ordered list of positions produced by the path planner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    waypoints: Vec<Vec2>,
}

impl Path {
    pub fn new(waypoints: Vec<Vec2>) -> Self {
        Self { waypoints }
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn get(&self, index: usize) -> Option<Vec2> {
        self.waypoints.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

impl From<Vec<Vec2>> for Path {
    fn from(waypoints: Vec<Vec2>) -> Self {
        Self::new(waypoints)
    }
}

/// Why a path query produced no path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The planner could not connect the two points.
    #[error("path search failed: {0}")]
    SearchFailed(String),

    /// The planner dropped the query, e.g. because a newer one replaced it.
    #[error("path query was cancelled")]
    Cancelled,
}

pub type PathResult = Result<Path, PathError>;

/// Where a follower is relative to its current path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FollowState {
    /// No path has been received yet.
    NoPath,
    /// Steering toward a waypoint.
    Following,
    /// Every waypoint of the current path has been passed.
    ReachedEnd,
}

/// Horizontal facing of the follower's sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

impl Facing {
    /// X scale to apply to sprite art drawn facing left.
    pub fn mirror_x(self) -> f32 {
        match self {
            Facing::Left => 1.0,
            Facing::Right => -1.0,
        }
    }
}
