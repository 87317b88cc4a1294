//! Roster configuration and authority role.

use climbnet_protocol::{Pose, Vec3};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Whether this process may mutate shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// The host: owns the roster and runs the simulation.
    Authority,
    /// Everyone else: mirrors what the authority replicates.
    Observer,
}

impl Role {
    pub fn has_authority(self) -> bool {
        matches!(self, Self::Authority)
    }
}

/// Configuration for a [`SessionRoster`](crate::SessionRoster).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Maximum concurrent participants.
    pub capacity: usize,

    /// Where new player entities appear.
    pub spawn: Pose,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            capacity: 12,
            spawn: Pose::new(Vec3::Y, 0.0),
        }
    }
}

impl RosterConfig {
    /// Fixes values that would make the roster unusable.
    ///
    /// A capacity of 0 would reject every participant, so it is raised to 1.
    pub fn validated(mut self) -> Self {
        if self.capacity == 0 {
            warn!("roster capacity 0 is unusable: raising to 1");
            self.capacity = 1;
        }
        self
    }
}
