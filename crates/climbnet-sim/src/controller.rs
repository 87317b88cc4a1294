//! Per-entity fixed-step movement.

use climbnet_protocol::{
    Buttons, EntityId, EntityState, InputRecord, ParticipantId, Vec3, ground_direction,
};
use tracing::trace;

use crate::{ControllerConfig, Motor};

/// Where a tick's input came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// A record was buffered for this tick.
    Buffered,
    /// Nothing arrived in time; the tick ran with zero input.
    Missing,
}

/// What one tick did to one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub entity: EntityId,
    pub input: InputSource,
    pub jumped: bool,
    /// Change in position over the tick.
    pub displacement: Vec3,
}

/// Drives one player entity, one tick at a time.
///
/// The only state kept between ticks besides the motor is the buttons
/// bitmask from the last tick that had input. Jumps fire on the rising
/// edge of the jump button, and only while grounded, so holding the button
/// does not bunny-hop.
#[derive(Debug, Clone)]
pub struct PlayerController<M: Motor> {
    entity: EntityId,
    owner: ParticipantId,
    motor: M,
    previous_buttons: Buttons,
    config: ControllerConfig,
}

impl<M: Motor> PlayerController<M> {
    pub fn new(entity: EntityId, owner: ParticipantId, motor: M, config: ControllerConfig) -> Self {
        Self {
            entity,
            owner,
            motor,
            previous_buttons: Buttons::empty(),
            config,
        }
    }

    /// Runs one simulation tick.
    ///
    /// `None` input means nothing arrived for this tick: no horizontal
    /// movement, no jump, and `previous_buttons` keeps its value. Gravity
    /// still applies.
    pub fn tick(&mut self, input: Option<InputRecord>, dt: f32) -> TickOutcome {
        let before = self.motor.pose().position;

        let (source, jumped) = match input {
            Some(input) => {
                let pose = self.motor.pose();
                let world_direction = pose
                    .rotate(ground_direction(input.direction))
                    .normalize_or_zero();

                let jumped = input
                    .buttons
                    .was_pressed(self.previous_buttons, Buttons::JUMP)
                    && self.motor.is_grounded();
                let impulse = if jumped { self.config.jump_impulse } else { 0.0 };

                self.motor
                    .step(world_direction * self.config.speed, impulse, dt);
                self.previous_buttons = input.buttons;
                (InputSource::Buffered, jumped)
            }
            None => {
                self.motor.step(Vec3::ZERO, 0.0, dt);
                (InputSource::Missing, false)
            }
        };

        if jumped {
            trace!(entity = %self.entity, owner = %self.owner, "jump");
        }

        TickOutcome {
            entity: self.entity,
            input: source,
            jumped,
            displacement: self.motor.pose().position - before,
        }
    }

    /// Replicated view of this entity.
    pub fn state(&self) -> EntityState {
        EntityState {
            entity: self.entity,
            owner: self.owner,
            pose: self.motor.pose(),
            grounded: self.motor.is_grounded(),
            previous_buttons: self.previous_buttons,
        }
    }

    /// Overwrites local state with the authority's (observers only).
    pub fn apply_state(&mut self, state: &EntityState) {
        self.motor.teleport(state.pose, state.grounded);
        self.previous_buttons = state.previous_buttons;
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn owner(&self) -> ParticipantId {
        self.owner
    }

    pub fn previous_buttons(&self) -> Buttons {
        self.previous_buttons
    }

    pub fn motor(&self) -> &M {
        &self.motor
    }
}

// =========================================================================
// Tests
// =========================================================================
