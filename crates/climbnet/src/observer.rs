//! The non-authoritative side: a read-only mirror of the host.

use climbnet_protocol::{
    Codec, EntityState, JsonCodec, ParticipantId, ReplicationMessage,
};
use climbnet_roster::{Role, RosterReplica};
use climbnet_sim::{ControllerConfig, KinematicMotor, Motor, World};
use tracing::trace;

use crate::ClimbnetError;

/// Mirrors a [`Host`](crate::Host) from its replication messages.
///
/// An observer never simulates: its world only changes through
/// [`apply`](Self::apply).
pub struct Observer<M: Motor = KinematicMotor, C: Codec = JsonCodec> {
    roster: RosterReplica,
    world: World<M>,
    codec: C,
}

impl<M: Motor, C: Codec> Observer<M, C> {
    pub fn new(controller: ControllerConfig, codec: C) -> Self {
        Self {
            roster: RosterReplica::new(),
            world: World::new(Role::Observer, controller),
            codec,
        }
    }

    /// Decodes and applies one message.
    ///
    /// # Errors
    /// [`ClimbnetError::Protocol`] on undecodable bytes or a roster message
    /// the mirror rejects. Nothing is applied in that case.
    pub fn receive(&mut self, bytes: &[u8]) -> Result<(), ClimbnetError> {
        let msg: ReplicationMessage = self.codec.decode(bytes)?;
        self.apply(&msg)
    }

    /// Applies one already-decoded message.
    ///
    /// # Errors
    /// [`ClimbnetError::Protocol`] if a roster snapshot fails validation or
    /// a spawn delta would exceed the announced capacity.
    pub fn apply(&mut self, msg: &ReplicationMessage) -> Result<(), ClimbnetError> {
        match msg {
            ReplicationMessage::Roster(snapshot) => self.roster.apply_snapshot(snapshot)?,
            ReplicationMessage::Delta(delta) => self.roster.apply_delta(delta)?,
            ReplicationMessage::World(snapshot) => {
                trace!(tick = snapshot.tick, entities = snapshot.entities.len(), "world snapshot");
                self.world.apply_snapshot(snapshot);
            }
        }
        Ok(())
    }

    /// Last replicated state of `participant`'s entity.
    pub fn state_of(&self, participant: &ParticipantId) -> Option<EntityState> {
        let entity = self.roster.entity_of(participant)?;
        self.world.state_of(entity)
    }

    pub fn roster(&self) -> &RosterReplica {
        &self.roster
    }

    pub fn world(&self) -> &World<M> {
        &self.world
    }
}
