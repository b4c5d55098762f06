use glam::Vec2;
use log::{debug, trace};

use super::config::FollowerConfig;
use super::traits::{PathService, RigidBody2D};
use super::types::{Facing, FollowState, Path, PathError, PathResult};
use crate::libs::pending::{Pending, PollState};

/// Steers one entity along the paths returned by a [`PathService`].
///
/// Drive it with two calls from the host loop:
/// - [`update`](Self::update) every frame, which collects finished path
///   queries and starts a new one every `repath_interval` seconds;
/// - [`fixed_update`](Self::fixed_update) every physics step, which applies
///   the steering force and advances the waypoint cursor.
#[derive(Debug)]
pub struct WaypointFollower {
    config: FollowerConfig,
    path: Option<Path>,
    current_waypoint: usize,
    reached_end_of_path: bool,
    pending: Option<Pending<PathResult>>,
    repath_timer: f32,
    facing: Facing,
}

impl WaypointFollower {
    pub fn new(config: FollowerConfig) -> Self {
        Self {
            config,
            path: None,
            current_waypoint: 0,
            reached_end_of_path: false,
            pending: None,
            // first request goes out on the first update
            repath_timer: 0.0,
            facing: Facing::default(),
        }
    }

    pub fn config(&self) -> &FollowerConfig {
        &self.config
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    pub fn current_waypoint(&self) -> usize {
        self.current_waypoint
    }

    pub fn reached_end_of_path(&self) -> bool {
        self.reached_end_of_path
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Whether a path query is outstanding.
    pub fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    pub fn state(&self) -> FollowState {
        match &self.path {
            None => FollowState::NoPath,
            Some(path) if self.current_waypoint >= path.len() => FollowState::ReachedEnd,
            Some(_) => FollowState::Following,
        }
    }

    /// Per-frame step: delivers a finished query, then repaths on schedule.
    ///
    /// A new query is only started when none is outstanding.
    pub fn update<S: PathService + ?Sized>(
        &mut self,
        dt: f32,
        origin: Vec2,
        target: Vec2,
        seeker: &mut S,
    ) {
        self.poll_pending();

        self.repath_timer -= dt;
        if self.repath_timer > 0.0 {
            return;
        }
        self.repath_timer += self.config.repath_interval;
        if self.repath_timer <= 0.0 {
            // fell more than one interval behind; don't queue a burst
            self.repath_timer = self.config.repath_interval;
        }

        if self.pending.is_none() {
            trace!("Requesting path {:?} -> {:?}", origin, target);
            self.pending = Some(seeker.start_path(origin, target));
        }
    }

    fn poll_pending(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        match pending.poll() {
            PollState::Pending => {}
            PollState::Ready(result) => {
                self.pending = None;
                self.on_path_complete(result);
            }
            PollState::Abandoned => {
                debug!("Path query abandoned by the planner");
                self.pending = None;
            }
        }
    }

    /// Installs a finished path. Failed queries are dropped and the current
    /// path stays in effect.
    pub fn on_path_complete(&mut self, result: PathResult) {
        match result {
            Ok(path) => {
                self.path = Some(path);
                self.current_waypoint = 0;
                self.reached_end_of_path = false;
            }
            Err(PathError::Cancelled) => trace!("Path query cancelled by the planner"),
            Err(e) => debug!("Discarding path: {}", e),
        }
    }

    /// Physics step: pushes `body` toward the current waypoint.
    ///
    /// # Arguments
    /// * `body` - The steered body; receives at most one force per call
    /// * `dt` - Physics step length in seconds
    ///
    /// # Returns
    /// The follow state after this step
    pub fn fixed_update<B: RigidBody2D + ?Sized>(
        &mut self,
        body: &mut B,
        dt: f32,
    ) -> FollowState {
        let Some(path) = &self.path else {
            return FollowState::NoPath;
        };

        let Some(waypoint) = path.get(self.current_waypoint) else {
            self.reached_end_of_path = true;
            return FollowState::ReachedEnd;
        };
        self.reached_end_of_path = false;

        let position = body.position();
        let direction = (waypoint - position).normalize_or_zero();
        let force = direction * self.config.speed * dt;
        body.add_force(force);

        if position.distance(waypoint) < self.config.next_waypoint_distance {
            self.current_waypoint += 1;
        }

        if force.x >= self.config.facing_dead_zone {
            self.facing = Facing::Right;
        } else if force.x <= -self.config.facing_dead_zone {
            self.facing = Facing::Left;
        }

        FollowState::Following
    }
}

impl Default for WaypointFollower {
    fn default() -> Self {
        Self::new(FollowerConfig::default())
    }
}
