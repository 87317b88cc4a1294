//! Local input pipeline for climbnet.
//!
//! Render frames and simulation ticks run at different rates. The
//! [`InputSampler`] bridges them: it is fed one [`KeyboardFrame`] per render
//! frame, merges everything it sees, and hands exactly one
//! [`InputRecord`](climbnet_protocol::InputRecord) to the network layer per
//! tick.
//!
//! ```text
//! frame ─┐
//! frame ─┼─ accumulate ─→ flush (tick boundary) ─→ InputRecord
//! frame ─┘
//! ```

mod keyboard;
mod sampler;

pub use keyboard::{KeyboardFrame, Keys};
pub use sampler::{CaptureState, InputSampler};
