//! Frame-delta accumulator.

use std::time::Duration;

use tracing::{trace, warn};

use crate::TickConfig;

/// Converts variable render-frame deltas into a whole number of fixed ticks.
///
/// ```
/// use std::time::Duration;
/// use climbnet_tick::{FixedStepClock, TickConfig};
///
/// let mut clock = FixedStepClock::new(TickConfig::with_rate(50));
/// assert_eq!(clock.advance(Duration::from_millis(10)), 0);
/// assert_eq!(clock.advance(Duration::from_millis(30)), 2);
/// ```
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: Duration,
    max_ticks_per_frame: u32,
    accumulator: Duration,
    tick: u64,
    dropped: u64,
}

impl FixedStepClock {
    pub fn new(config: TickConfig) -> Self {
        let config = config.validated();
        Self {
            step: config.tick_duration(),
            max_ticks_per_frame: config.max_ticks_per_frame,
            accumulator: Duration::ZERO,
            tick: 0,
            dropped: 0,
        }
    }

    /// Adds one frame's elapsed time and returns how many ticks to run now.
    ///
    /// Leftover time below one tick carries over to the next frame. If the
    /// frame owes more than `max_ticks_per_frame` ticks, the excess is
    /// dropped.
    pub fn advance(&mut self, frame_delta: Duration) -> u32 {
        self.accumulator += frame_delta;

        let owed = (self.accumulator.as_nanos() / self.step.as_nanos()) as u64;
        let run = owed.min(self.max_ticks_per_frame as u64) as u32;

        if owed > run as u64 {
            let dropped = owed - run as u64;
            self.dropped += dropped;
            warn!(owed, run, dropped, "frame too long: dropping ticks");
            self.accumulator = Duration::ZERO;
        } else {
            self.accumulator -= self.step * run;
        }

        self.tick += run as u64;
        if run > 0 {
            trace!(run, tick = self.tick, "ticks due");
        }
        run
    }

    /// Fraction of the next tick already elapsed, `0.0..1.0`. Renderers use
    /// it to interpolate between the last two simulated states.
    pub fn alpha(&self) -> f32 {
        (self.accumulator.as_secs_f64() / self.step.as_secs_f64()) as f32
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Ticks produced so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Ticks dropped because a frame ran too long.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
