//! Tick configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Tick rate and backlog bound for [`FixedStepClock`](crate::FixedStepClock).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Simulation rate in Hz, `1..=MAX_TICK_RATE_HZ`.
    pub tick_rate_hz: u32,

    /// Upper bound on ticks a single frame may produce. Past it the clock
    /// drops the backlog rather than spiralling.
    pub max_ticks_per_frame: u32,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60,
            max_ticks_per_frame: 8,
        }
    }
}

impl TickConfig {
    pub const MAX_TICK_RATE_HZ: u32 = 128;

    pub fn with_rate(tick_rate_hz: u32) -> Self {
        Self {
            tick_rate_hz,
            ..Default::default()
        }
    }

    /// Clamps values into their usable ranges.
    ///
    /// - `tick_rate_hz` into `1..=MAX_TICK_RATE_HZ` (a fixed-step simulation
    ///   has no event-driven mode)
    /// - `max_ticks_per_frame` to at least 1
    pub fn validated(mut self) -> Self {
        if self.tick_rate_hz == 0 || self.tick_rate_hz > Self::MAX_TICK_RATE_HZ {
            let clamped = self.tick_rate_hz.clamp(1, Self::MAX_TICK_RATE_HZ);
            warn!(rate = self.tick_rate_hz, clamped, "tick_rate_hz out of range: clamping");
            self.tick_rate_hz = clamped;
        }
        if self.max_ticks_per_frame == 0 {
            warn!("max_ticks_per_frame 0 would stall the simulation: using 1");
            self.max_ticks_per_frame = 1;
        }
        self
    }

    /// Length of one tick.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz.max(1) as f64)
    }
}
