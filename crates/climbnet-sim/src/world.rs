//! The set of simulated player entities.

use std::collections::BTreeMap;

use climbnet_protocol::{EntityId, EntityState, ParticipantId, Pose, Tick, WorldSnapshot};
use climbnet_roster::{EntitySpawner, Role};
use tracing::{debug, info, trace};

use crate::{ControllerConfig, InputMailbox, InputSource, Motor, PlayerController, TickOutcome};

/// Owns every player entity and advances them one tick at a time.
///
/// Entities are kept in a `BTreeMap` so every step visits them in entity-id
/// order, which keeps the simulation deterministic for a given input
/// sequence.
///
/// On the authority, [`step`](Self::step) consumes buffered input and
/// [`snapshot`](Self::snapshot) produces what observers need. On an
/// observer, `step` does nothing and [`apply_snapshot`](Self::apply_snapshot)
/// is the only way state changes.
pub struct World<M: Motor> {
    role: Role,
    config: ControllerConfig,
    tick: Tick,
    next_entity: u64,
    controllers: BTreeMap<EntityId, PlayerController<M>>,
}

impl<M: Motor> World<M> {
    pub fn new(role: Role, config: ControllerConfig) -> Self {
        Self {
            role,
            config: config.validated(),
            tick: 0,
            next_entity: 1,
            controllers: BTreeMap::new(),
        }
    }

    /// Runs one fixed-rate tick for every entity this process has
    /// authority over.
    ///
    /// Each entity takes its owner's record from `mailbox`; entities whose
    /// owner sent nothing run with zero input. The mailbox window is closed
    /// afterwards, so nothing left in it carries over.
    pub fn step(&mut self, mailbox: &mut InputMailbox, dt: f32) -> Vec<TickOutcome> {
        if !self.role.has_authority() {
            trace!("step skipped without authority");
            mailbox.end_tick();
            return Vec::new();
        }

        self.tick += 1;
        let mut outcomes = Vec::with_capacity(self.controllers.len());
        for controller in self.controllers.values_mut() {
            let input = mailbox.take(&controller.owner());
            let outcome = controller.tick(input, dt);
            if outcome.input == InputSource::Missing {
                debug!(
                    tick = self.tick,
                    entity = %outcome.entity,
                    owner = %controller.owner(),
                    "no input buffered, running zero input"
                );
            }
            outcomes.push(outcome);
        }
        mailbox.end_tick();

        trace!(tick = self.tick, entities = outcomes.len(), "world stepped");
        outcomes
    }

    /// Every entity's replicated state after the last step.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            entities: self.controllers.values().map(|c| c.state()).collect(),
        }
    }

    /// Mirrors an authority snapshot (observers).
    ///
    /// Entities missing locally are created, entities absent from the
    /// snapshot are dropped. Snapshots older than what has already been
    /// applied are ignored.
    pub fn apply_snapshot(&mut self, snapshot: &WorldSnapshot) {
        if self.role.has_authority() {
            debug!("authority ignores incoming world snapshot");
            return;
        }
        if snapshot.tick < self.tick {
            trace!(stale = snapshot.tick, current = self.tick, "stale world snapshot");
            return;
        }

        self.tick = snapshot.tick;
        self.controllers
            .retain(|id, _| snapshot.entities.iter().any(|s| s.entity == *id));

        for state in &snapshot.entities {
            let config = self.config;
            self.controllers
                .entry(state.entity)
                .or_insert_with(|| {
                    PlayerController::new(
                        state.entity,
                        state.owner,
                        M::spawn(state.pose, &config),
                        config,
                    )
                })
                .apply_state(state);
        }
    }

    pub fn state_of(&self, entity: EntityId) -> Option<EntityState> {
        self.controllers.get(&entity).map(|c| c.state())
    }

    pub fn controller(&self, entity: EntityId) -> Option<&PlayerController<M>> {
        self.controllers.get(&entity)
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

impl<M: Motor> EntitySpawner for World<M> {
    fn spawn(&mut self, owner: ParticipantId, pose: Pose) -> EntityId {
        let entity = EntityId(self.next_entity);
        self.next_entity += 1;
        let motor = M::spawn(pose, &self.config);
        self.controllers
            .insert(entity, PlayerController::new(entity, owner, motor, self.config));
        info!(%entity, %owner, "entity spawned");
        entity
    }

    fn despawn(&mut self, entity: EntityId) {
        if self.controllers.remove(&entity).is_some() {
            info!(%entity, "entity despawned");
        }
    }
}

#[cfg(test)]
mod tests {
    use climbnet_protocol::{Buttons, InputRecord, Vec2, Vec3};

    use super::*;
    use crate::KinematicMotor;

    const DT: f32 = 1.0 / 60.0;

    fn host_world() -> World<KinematicMotor> {
        World::new(Role::Authority, ControllerConfig::default())
    }

    #[test]
    fn test_spawn_allocates_increasing_ids() {
        let mut w = host_world();
        let a = w.spawn(ParticipantId(1), Pose::default());
        let b = w.spawn(ParticipantId(2), Pose::default());
        assert!(b > a);
        assert_eq!(w.len(), 2);
    }

    #[test]
    fn test_despawn_unknown_is_no_op() {
        let mut w = host_world();
        w.spawn(ParticipantId(1), Pose::default());
        w.despawn(EntityId(99));
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn test_step_routes_input_to_owner_only() {
        let mut w = host_world();
        let a = w.spawn(ParticipantId(1), Pose::default());
        let b = w.spawn(ParticipantId(2), Pose::default());
        let mut mb = InputMailbox::new();
        mb.deliver(ParticipantId(1), InputRecord::new(Vec2::X, Buttons::empty()));

        let outcomes = w.step(&mut mb, DT);

        assert_eq!(outcomes.len(), 2);
        assert!(w.state_of(a).unwrap().pose.position.x > 0.0);
        assert_eq!(w.state_of(b).unwrap().pose.position.x, 0.0);
        assert_eq!(outcomes[1].input, InputSource::Missing);
    }

    #[test]
    fn test_step_as_observer_does_nothing() {
        let mut w: World<KinematicMotor> = World::new(Role::Observer, ControllerConfig::default());
        let mut mb = InputMailbox::new();
        mb.deliver(ParticipantId(1), InputRecord::default());

        assert!(w.step(&mut mb, DT).is_empty());
        assert_eq!(w.tick(), 0);
        assert_eq!(mb.pending(), 0);
    }

    #[test]
    fn test_snapshot_then_apply_mirrors_state() {
        let mut host = host_world();
        let a = host.spawn(ParticipantId(1), Pose::new(Vec3::new(2.0, 0.0, 3.0), 0.0));
        let mut mb = InputMailbox::new();
        mb.deliver(ParticipantId(1), InputRecord::new(Vec2::Y, Buttons::empty()));
        host.step(&mut mb, DT);

        let mut observer: World<KinematicMotor> =
            World::new(Role::Observer, ControllerConfig::default());
        observer.apply_snapshot(&host.snapshot());

        assert_eq!(observer.tick(), 1);
        assert_eq!(observer.state_of(a), host.state_of(a));
    }

    #[test]
    fn test_apply_snapshot_drops_missing_entities_and_ignores_stale() {
        let mut host = host_world();
        let a = host.spawn(ParticipantId(1), Pose::default());
        let mut mb = InputMailbox::new();
        host.step(&mut mb, DT);
        let older = host.snapshot();

        host.despawn(a);
        host.step(&mut mb, DT);
        let newer = host.snapshot();

        let mut observer: World<KinematicMotor> =
            World::new(Role::Observer, ControllerConfig::default());
        observer.apply_snapshot(&newer);
        observer.apply_snapshot(&older);

        assert!(observer.is_empty(), "stale snapshot must not resurrect {a}");
    }
}
