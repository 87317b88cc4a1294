//! Identity types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A simulation step counter. Starts at 0 and only moves forward.
pub type Tick = u64;

/// Identifies a connected participant.
///
/// Assigned by the external transport. Unique among currently connected
/// participants, stable for as long as the participant stays connected, and
/// possibly reused once they leave: climbnet never assumes otherwise.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ParticipantId(pub u32);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// Identifies a spawned player entity.
///
/// Allocated by the authority's world; never reused within one world, so a
/// stale `EntityId` cannot alias a newer entity even when the owning
/// `ParticipantId` gets recycled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E-{}", self.0)
    }
}
