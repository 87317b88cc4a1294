//! Per-tick input records.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::Vec2;

bitflags! {
    /// Logical buttons held at some point during a tick.
    ///
    /// The sampler ORs every frame's buttons into one mask, so a press
    /// that lasted a single frame between two ticks still shows up.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Buttons: u32 {
        const JUMP = 1 << 0;
    }
}

impl Default for Buttons {
    fn default() -> Self {
        Self::empty()
    }
}

impl Buttons {
    /// Rising edge: every bit of `button` is down now and was up in
    /// `previous`.
    pub fn was_pressed(self, previous: Buttons, button: Buttons) -> bool {
        self.contains(button) && !previous.intersects(button)
    }
}

/// One tick's worth of player intent.
///
/// `direction` is either zero or unit length once it leaves the sampler.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputRecord {
    pub direction: Vec2,
    pub buttons: Buttons,
}

impl InputRecord {
    pub const fn new(direction: Vec2, buttons: Buttons) -> Self {
        Self { direction, buttons }
    }
}
