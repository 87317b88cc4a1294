//! A snapshot of keyboard state for one render frame.

use bitflags::bitflags;

bitflags! {
    /// Keys the sampler cares about.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Keys: u16 {
        const W = 1 << 0;
        const A = 1 << 1;
        const S = 1 << 2;
        const D = 1 << 3;
        const SPACE = 1 << 4;
        const ENTER = 1 << 5;
        const NUMPAD_ENTER = 1 << 6;
        const ESCAPE = 1 << 7;

        /// Any of these toggles input capture.
        const CAPTURE_TOGGLE = Self::ENTER.bits() | Self::NUMPAD_ENTER.bits() | Self::ESCAPE.bits();
    }
}

/// Keyboard state sampled once per render frame.
///
/// `held` answers "is the key down right now"; `pressed` answers "did the
/// key go down during this frame". A key pressed this frame is also held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardFrame {
    held: Keys,
    pressed: Keys,
}

impl Default for KeyboardFrame {
    fn default() -> Self {
        Self {
            held: Keys::empty(),
            pressed: Keys::empty(),
        }
    }
}

impl KeyboardFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `keys` as held down (they went down in an earlier frame).
    pub fn hold(mut self, keys: Keys) -> Self {
        self.held |= keys;
        self
    }

    /// Marks `keys` as having gone down this frame.
    pub fn press(mut self, keys: Keys) -> Self {
        self.held |= keys;
        self.pressed |= keys;
        self
    }

    pub fn is_held(&self, key: Keys) -> bool {
        self.held.contains(key)
    }

    pub fn was_pressed_this_frame(&self, key: Keys) -> bool {
        self.pressed.contains(key)
    }

    /// Whether any of `keys` went down this frame.
    pub fn any_pressed_this_frame(&self, keys: Keys) -> bool {
        self.pressed.intersects(keys)
    }
}
