//! Messages the authority sends so observers can mirror its state.
//!
//! Observers never share memory with the authority. They receive a full
//! [`RosterSnapshot`] when they start observing, then a stream of
//! [`RosterDelta`]s for each spawn and despawn, plus a [`WorldSnapshot`]
//! per tick carrying entity transforms.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Buttons, EntityId, ParticipantId, Pose, ProtocolError, Tick};

/// One roster mapping: which entity a participant controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub participant: ParticipantId,
    pub entity: EntityId,
}

/// The full roster at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub capacity: usize,
    pub entries: Vec<RosterEntry>,
}

impl RosterSnapshot {
    /// Rejects snapshots that could never come from a healthy authority.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.entries.len() > self.capacity {
            return Err(ProtocolError::InvalidMessage(format!(
                "roster snapshot has {} entries but capacity {}",
                self.entries.len(),
                self.capacity
            )));
        }
        let mut seen = HashSet::with_capacity(self.entries.len());
        for entry in &self.entries {
            if !seen.insert(entry.participant) {
                return Err(ProtocolError::InvalidMessage(format!(
                    "participant {} listed twice",
                    entry.participant
                )));
            }
        }
        Ok(())
    }
}

/// An incremental roster change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RosterDelta {
    Spawned {
        participant: ParticipantId,
        entity: EntityId,
        pose: Pose,
    },
    Despawned {
        participant: ParticipantId,
        entity: EntityId,
    },
}

impl RosterDelta {
    pub fn participant(&self) -> ParticipantId {
        match self {
            Self::Spawned { participant, .. } | Self::Despawned { participant, .. } => {
                *participant
            }
        }
    }
}

/// Replicated per-entity state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub entity: EntityId,
    pub owner: ParticipantId,
    pub pose: Pose,
    pub grounded: bool,
    /// Buttons applied on the last tick that had input. Replicated so
    /// edge detection survives a change of authority.
    pub previous_buttons: Buttons,
}

/// Every entity's state after a tick.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: Tick,
    pub entities: Vec<EntityState>,
}

/// Envelope for everything on the replication channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum ReplicationMessage {
    Roster(RosterSnapshot),
    Delta(RosterDelta),
    World(WorldSnapshot),
}
