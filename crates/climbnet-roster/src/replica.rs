//! The observer side of roster replication.

use std::collections::{HashMap, HashSet};

use climbnet_protocol::{EntityId, ParticipantId, ProtocolError, RosterDelta, RosterSnapshot};
use tracing::{debug, trace, warn};

/// A read-only mirror of the authority's roster.
///
/// The only way to change it is to feed it what the authority sent. The
/// replication channel may deliver a delta more than once and out of
/// order, so the replica remembers every entity it has seen despawn.
/// Entity ids are never reused, which makes a `Spawned` for a retired id
/// always stale.
#[derive(Debug, Default)]
pub struct RosterReplica {
    capacity: Option<usize>,
    entries: HashMap<ParticipantId, EntityId>,
    retired: HashSet<EntityId>,
}

impl RosterReplica {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the mirror with a full snapshot.
    ///
    /// Entities the snapshot no longer lists are retired.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidMessage`] for a malformed snapshot;
    /// the current mirror is left untouched.
    pub fn apply_snapshot(&mut self, snapshot: &RosterSnapshot) -> Result<(), ProtocolError> {
        snapshot.validate()?;
        let entries: HashMap<_, _> = snapshot
            .entries
            .iter()
            .map(|e| (e.participant, e.entity))
            .collect();
        let live: HashSet<_> = entries.values().copied().collect();
        self.retired
            .extend(self.entries.values().filter(|e| !live.contains(e)).copied());

        self.capacity = Some(snapshot.capacity);
        self.entries = entries;
        debug!(players = self.entries.len(), "roster snapshot applied");
        Ok(())
    }

    /// Applies one roster delta.
    ///
    /// A `Spawned` for an entity that already despawned is ignored.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidMessage`] when a `Spawned` for a new
    /// participant would grow the mirror past the capacity announced by the
    /// last snapshot. The mirror is left untouched.
    pub fn apply_delta(&mut self, delta: &RosterDelta) -> Result<(), ProtocolError> {
        match *delta {
            RosterDelta::Spawned {
                participant,
                entity,
                ..
            } => {
                if self.retired.contains(&entity) {
                    debug!(%participant, %entity, "ignoring spawn of a despawned entity");
                    return Ok(());
                }
                let joining = !self.entries.contains_key(&participant);
                if let Some(capacity) = self.capacity {
                    if joining && self.entries.len() >= capacity {
                        warn!(%participant, %entity, capacity, "spawn delta exceeds roster capacity");
                        return Err(ProtocolError::InvalidMessage(format!(
                            "spawn of {participant} would exceed roster capacity {capacity}"
                        )));
                    }
                }
                if let Some(previous) = self.entries.insert(participant, entity) {
                    if previous != entity {
                        self.retired.insert(previous);
                    }
                }
            }
            RosterDelta::Despawned {
                participant,
                entity,
            } => {
                self.retired.insert(entity);
                // A late despawn for an older entity must not evict the
                // participant's current one.
                if self.entries.get(&participant) == Some(&entity) {
                    self.entries.remove(&participant);
                }
            }
        }
        trace!(participant = %delta.participant(), players = self.entries.len(), "roster delta applied");
        Ok(())
    }

    pub fn entity_of(&self, participant: &ParticipantId) -> Option<EntityId> {
        self.entries.get(participant).copied()
    }

    pub fn contains(&self, participant: &ParticipantId) -> bool {
        self.entries.contains_key(participant)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The authority's capacity, known once a snapshot has arrived.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}
