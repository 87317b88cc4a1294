//! Movement tuning.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Standard gravity, m/s².
pub const WORLD_GRAVITY: f32 = -9.81;

/// Movement constants shared by every player entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Horizontal speed in units per second.
    pub speed: f32,

    /// Upward velocity applied on the tick a jump triggers.
    pub jump_impulse: f32,

    /// Vertical acceleration. Characters fall at twice world gravity,
    /// which reads better than physically accurate jumps.
    pub gravity: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            jump_impulse: 10.0,
            gravity: WORLD_GRAVITY * 2.0,
        }
    }
}

impl ControllerConfig {
    /// Replaces negative speeds/impulses and upward gravity with defaults.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if self.speed.is_nan() || self.speed < 0.0 {
            warn!(speed = self.speed, "negative or NaN speed: using default");
            self.speed = defaults.speed;
        }
        if self.jump_impulse.is_nan() || self.jump_impulse < 0.0 {
            warn!(jump_impulse = self.jump_impulse, "negative or NaN jump impulse: using default");
            self.jump_impulse = defaults.jump_impulse;
        }
        if self.gravity.is_nan() || self.gravity > 0.0 {
            warn!(gravity = self.gravity, "gravity must point down: using default");
            self.gravity = defaults.gravity;
        }
        self
    }
}
