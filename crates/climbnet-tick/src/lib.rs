//! Fixed-step tick accounting for climbnet.
//!
//! Render frames arrive at whatever rate the platform manages; the
//! simulation advances in fixed steps. [`FixedStepClock`] sits between the
//! two: feed it each frame's elapsed time and it answers how many times to
//! call `Host::step` before the next frame.
//!
//! ```text
//! frame (16.9 ms) ─→ advance ─→ 1 tick
//! frame ( 4.1 ms) ─→ advance ─→ 0 ticks   (remainder carried over)
//! frame (41.0 ms) ─→ advance ─→ 2 ticks
//! ```
//!
//! The clock never sleeps. Whoever owns the frame loop (an engine, or a
//! `tokio::time::interval` in a headless host) decides when frames happen.

mod clock;
mod config;

pub use clock::FixedStepClock;
pub use config::TickConfig;
