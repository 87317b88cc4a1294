//! The input sampler: accumulate per frame, flush per tick.

use climbnet_protocol::{Buttons, InputRecord, Vec2};
use tracing::{debug, trace};

use crate::{KeyboardFrame, Keys};

/// Whether the sampler is currently capturing player intent.
///
/// Mirrors a locked cursor: while `Released` the player is interacting with
/// something else (a menu, another window) and keys must not move the
/// character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    Captured,
    #[default]
    Released,
}

impl CaptureState {
    fn toggled(self) -> Self {
        match self {
            Self::Captured => Self::Released,
            Self::Released => Self::Captured,
        }
    }
}

/// Accumulates keyboard input across render frames and flushes one
/// [`InputRecord`] per simulation tick.
///
/// # Protocol
///
/// 1. [`sample_frame`](Self::sample_frame) runs once per render frame,
///    before the network layer asks for input.
/// 2. [`flush`](Self::flush) runs at each tick boundary.
///
/// Directions add up (two frames of "up" then "right" become a diagonal)
/// and buttons OR together (a tap seen in any frame survives to the tick).
///
/// The reset after a flush is deferred to the start of the next
/// `sample_frame`. When one render frame drives several ticks, every tick
/// in that frame sees the frame's input instead of the later ones getting
/// nothing.
#[derive(Debug, Default)]
pub struct InputSampler {
    accumulated: InputRecord,
    reset_pending: bool,
    capture: CaptureState,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture(&self) -> CaptureState {
        self.capture
    }

    pub fn is_captured(&self) -> bool {
        self.capture == CaptureState::Captured
    }

    /// Samples one render frame.
    ///
    /// `None` means no keyboard is attached this frame: a pending reset is
    /// still applied, nothing else happens.
    pub fn sample_frame(&mut self, keyboard: Option<&KeyboardFrame>) {
        self.apply_pending_reset();

        let Some(keyboard) = keyboard else {
            return;
        };

        if wants_capture_toggle(keyboard) {
            self.capture = self.capture.toggled();
            debug!(capture = ?self.capture, "input capture toggled");
        }

        if !self.is_captured() {
            return;
        }

        self.accumulated.direction += frame_direction(keyboard);

        let mut buttons = Buttons::empty();
        buttons.set(Buttons::JUMP, keyboard.is_held(Keys::SPACE));
        self.accumulated.buttons = self.accumulated.buttons | buttons;
    }

    /// Hands the accumulated input to the network layer for this tick.
    ///
    /// The direction is normalized to unit length (or zero). Flushing again
    /// before the next frame returns the same record.
    pub fn flush(&mut self) -> InputRecord {
        self.accumulated.direction = self.accumulated.direction.normalize_or_zero();
        self.reset_pending = true;
        trace!(
            x = self.accumulated.direction.x,
            y = self.accumulated.direction.y,
            buttons = self.accumulated.buttons.bits(),
            "input flushed"
        );
        self.accumulated
    }

    /// Captures input as soon as the local participant has joined.
    ///
    /// Anything accumulated before the join is dropped: the first tick the
    /// participant simulates only sees frames sampled after it.
    pub fn on_local_join(&mut self) {
        self.accumulated = InputRecord::default();
        self.reset_pending = false;
        if !self.is_captured() {
            self.capture = CaptureState::Captured;
            debug!("input captured on local join");
        }
    }

    /// Stops capturing and drops anything accumulated, e.g. on shutdown.
    pub fn release(&mut self) {
        self.capture = CaptureState::Released;
        self.accumulated = InputRecord::default();
        self.reset_pending = false;
        debug!("input released");
    }

    fn apply_pending_reset(&mut self) {
        if self.reset_pending {
            self.reset_pending = false;
            self.accumulated = InputRecord::default();
        }
    }
}

fn wants_capture_toggle(keyboard: &KeyboardFrame) -> bool {
    keyboard.any_pressed_this_frame(Keys::CAPTURE_TOGGLE)
}

/// The raw (un-normalized) direction held during one frame.
fn frame_direction(keyboard: &KeyboardFrame) -> Vec2 {
    let mut direction = Vec2::ZERO;
    if keyboard.is_held(Keys::W) {
        direction += Vec2::Y;
    }
    if keyboard.is_held(Keys::S) {
        direction += Vec2::NEG_Y;
    }
    if keyboard.is_held(Keys::A) {
        direction += Vec2::NEG_X;
    }
    if keyboard.is_held(Keys::D) {
        direction += Vec2::X;
    }
    direction
}
