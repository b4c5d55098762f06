//! Type definitions for the update check

use serde::{Deserialize, Serialize};

/// Version information raised with an update notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Version number in semver format
    pub version: String,

    /// Update description and release notes
    pub notes: String,
}

/// What the host is doing while the update loop ticks.
///
/// The check schedule is shifted by a configurable offset depending on this;
/// see `UpdateCheckConfig::idle_offset_minutes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostActivity {
    /// Editing, nothing is simulating.
    #[default]
    Idle,
    /// A simulation is running (play mode past its warm-up, or an active
    /// pathfinding instance exists).
    Simulating,
}
