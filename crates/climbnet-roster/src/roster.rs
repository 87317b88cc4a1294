//! The authority's roster.
//!
//! # Concurrency note
//!
//! `SessionRoster` is a plain `HashMap` with no locking. It belongs to the
//! single simulation thread of the authority; join and leave events are
//! delivered on that thread between ticks.

use std::collections::HashMap;

use climbnet_protocol::{EntityId, ParticipantId, RosterDelta, RosterEntry, RosterSnapshot};
use tracing::{debug, info, warn};

use crate::{EntitySpawner, Role, RosterConfig, RosterError};

/// What a join event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// A new entity was spawned for the participant.
    Spawned(EntityId),
    /// The participant was already on the roster (duplicate delivery).
    /// Nothing changed.
    AlreadyPresent(EntityId),
    /// This process has no authority; the event was dropped.
    Ignored,
}

/// What a leave event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// The participant's entity was destroyed.
    Despawned(EntityId),
    /// The participant was not on the roster (already removed).
    NotPresent,
    /// This process has no authority; the event was dropped.
    Ignored,
}

/// Maps each connected participant to the entity they control.
///
/// ## Invariants
///
/// - `len() <= capacity()` at all times.
/// - Every entity spawned through this roster has exactly one entry until
///   the matching leave despawns it.
/// - Only [`Role::Authority`] mutates it; on an observer every mutation is
///   a logged no-op.
///
/// Each successful mutation also queues a [`RosterDelta`] for observers;
/// drain them with [`drain_deltas`](Self::drain_deltas).
pub struct SessionRoster {
    role: Role,
    config: RosterConfig,
    entries: HashMap<ParticipantId, EntityId>,
    deltas: Vec<RosterDelta>,
}

impl SessionRoster {
    pub fn new(role: Role, config: RosterConfig) -> Self {
        let config = config.validated();
        Self {
            role,
            entries: HashMap::with_capacity(config.capacity),
            config,
            deltas: Vec::new(),
        }
    }

    /// Handles a participant joining the session.
    ///
    /// Capacity is checked *before* anything is spawned, so a rejected
    /// participant never leaves an orphaned entity behind.
    ///
    /// # Errors
    /// [`RosterError::CapacityExceeded`] when the roster is full. The caller
    /// must pass this on to the transport so it can reject the participant.
    pub fn on_join(
        &mut self,
        participant: ParticipantId,
        spawner: &mut impl EntitySpawner,
    ) -> Result<JoinOutcome, RosterError> {
        if !self.role.has_authority() {
            debug!(%participant, "join ignored without authority");
            return Ok(JoinOutcome::Ignored);
        }

        if let Some(&entity) = self.entries.get(&participant) {
            debug!(%participant, %entity, "duplicate join, already on roster");
            return Ok(JoinOutcome::AlreadyPresent(entity));
        }

        if self.entries.len() >= self.config.capacity {
            warn!(
                %participant,
                capacity = self.config.capacity,
                "roster full, rejecting join"
            );
            return Err(RosterError::CapacityExceeded {
                participant,
                capacity: self.config.capacity,
            });
        }

        let pose = self.config.spawn;
        let entity = spawner.spawn(participant, pose);
        self.entries.insert(participant, entity);
        self.deltas.push(RosterDelta::Spawned {
            participant,
            entity,
            pose,
        });

        info!(%participant, %entity, players = self.entries.len(), "player joined");
        Ok(JoinOutcome::Spawned(entity))
    }

    /// Handles a participant leaving the session. Safe to call repeatedly.
    pub fn on_leave(
        &mut self,
        participant: ParticipantId,
        spawner: &mut impl EntitySpawner,
    ) -> LeaveOutcome {
        if !self.role.has_authority() {
            debug!(%participant, "leave ignored without authority");
            return LeaveOutcome::Ignored;
        }

        let Some(entity) = self.entries.remove(&participant) else {
            debug!(%participant, "leave for participant not on roster");
            return LeaveOutcome::NotPresent;
        };

        spawner.despawn(entity);
        self.deltas.push(RosterDelta::Despawned {
            participant,
            entity,
        });

        info!(%participant, %entity, players = self.entries.len(), "player left");
        LeaveOutcome::Despawned(entity)
    }

    /// Takes all deltas queued since the last call, oldest first.
    pub fn drain_deltas(&mut self) -> Vec<RosterDelta> {
        std::mem::take(&mut self.deltas)
    }

    /// Full roster state for an observer that starts mid-session.
    /// Entries are sorted by participant for stable output.
    pub fn snapshot(&self) -> RosterSnapshot {
        let mut entries: Vec<RosterEntry> = self
            .entries
            .iter()
            .map(|(&participant, &entity)| RosterEntry {
                participant,
                entity,
            })
            .collect();
        entries.sort_by_key(|e| e.participant);
        RosterSnapshot {
            capacity: self.config.capacity,
            entries,
        }
    }

    pub fn entity_of(&self, participant: &ParticipantId) -> Option<EntityId> {
        self.entries.get(participant).copied()
    }

    pub fn contains(&self, participant: &ParticipantId) -> bool {
        self.entries.contains_key(participant)
    }

    /// Iterates `(participant, entity)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, EntityId)> + '_ {
        self.entries.iter().map(|(&p, &e)| (p, e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.config.capacity
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

// =========================================================================
// Tests
// =========================================================================
