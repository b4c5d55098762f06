use serde::{Deserialize, Serialize};

/// Tuning for [`super::WaypointFollower`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowerConfig {
    /// Force magnitude per second of simulation.
    pub speed: f32,
    /// A waypoint counts as reached once the body is closer than this.
    pub next_waypoint_distance: f32,
    /// Seconds between path requests.
    pub repath_interval: f32,
    /// Horizontal force below which the facing is left unchanged.
    pub facing_dead_zone: f32,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            next_waypoint_distance: 3.0,
            repath_interval: 0.5,
            facing_dead_zone: 0.01,
        }
    }
}
