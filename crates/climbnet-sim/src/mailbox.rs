//! Per-participant input slots for the current tick.

use std::collections::HashMap;

use climbnet_protocol::{InputRecord, ParticipantId};
use tracing::trace;

/// Holds at most one [`InputRecord`] per participant for the tick being
/// simulated.
///
/// A second delivery for the same participant before the tick runs
/// overwrites the first: the newest intent wins. Whatever is still unread
/// when the tick ends is discarded. Inputs are never carried over or
/// replayed into a later tick.
#[derive(Debug, Default)]
pub struct InputMailbox {
    slots: HashMap<ParticipantId, InputRecord>,
    overwritten: u64,
    discarded: u64,
}

impl InputMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` for `participant`'s next tick.
    ///
    /// Returns `true` if this replaced an unread record.
    pub fn deliver(&mut self, participant: ParticipantId, record: InputRecord) -> bool {
        let replaced = self.slots.insert(participant, record).is_some();
        if replaced {
            self.overwritten += 1;
            trace!(%participant, "input overwritten before tick");
        }
        replaced
    }

    /// Removes and returns `participant`'s record for this tick, if any.
    pub fn take(&mut self, participant: &ParticipantId) -> Option<InputRecord> {
        self.slots.remove(participant)
    }

    /// Ends the tick window, dropping unread records. Returns how many.
    pub fn end_tick(&mut self) -> usize {
        let dropped = self.slots.len();
        if dropped > 0 {
            self.discarded += dropped as u64;
            trace!(dropped, "unread inputs discarded at tick end");
        }
        self.slots.clear();
        dropped
    }

    pub fn pending(&self) -> usize {
        self.slots.len()
    }

    /// Total records replaced by a newer delivery before being read.
    pub fn overwritten_total(&self) -> u64 {
        self.overwritten
    }

    /// Total records dropped unread at the end of a tick.
    pub fn discarded_total(&self) -> u64 {
        self.discarded
    }
}
