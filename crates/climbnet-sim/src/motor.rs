//! Character motors: the physics collaborator for a player entity.

use climbnet_protocol::{Pose, Vec3};

use crate::ControllerConfig;

/// Moves one character through the world.
///
/// The controller decides *what* the character wants to do each tick; the
/// motor decides what actually happens (collision, gravity, ground
/// detection). Swap in a real physics backend by implementing this trait.
///
/// ## Static dispatch
///
/// [`World`](crate::World) and [`PlayerController`](crate::PlayerController)
/// take the motor as a type parameter (`World<M: Motor>`) rather than a
/// `Box<dyn Motor>`. Every entity in a world uses the same motor type, so
/// the compiler can inline `step` into the tick loop.
///
/// ## `where Self: Sized` on `spawn`
///
/// `spawn` returns `Self`, which only makes sense for a concrete type. The
/// `Sized` bound keeps that one constructor out of the trait's vtable, so
/// `Motor` stays object safe.
///
/// ## Determinism
///
/// Authority and observers must agree on where a character ends up. A
/// motor must be a pure function of its state and the `step` arguments:
/// no wall-clock reads and no randomness.
pub trait Motor {
    /// Creates a motor for a character standing at `pose`.
    fn spawn(pose: Pose, config: &ControllerConfig) -> Self
    where
        Self: Sized;

    fn pose(&self) -> Pose;

    /// Whether the character is standing on something this tick.
    fn is_grounded(&self) -> bool;

    /// Advances one tick.
    ///
    /// `horizontal_velocity` is applied for the whole tick. A positive
    /// `jump_impulse` replaces the vertical velocity; otherwise vertical
    /// motion follows gravity.
    fn step(&mut self, horizontal_velocity: Vec3, jump_impulse: f32, dt: f32);

    /// Overwrites the motor state with a replicated one (observers only).
    fn teleport(&mut self, pose: Pose, grounded: bool);
}

/// A kinematic motor over an infinite flat floor.
#[derive(Debug, Clone)]
pub struct KinematicMotor {
    pose: Pose,
    vertical_velocity: f32,
    grounded: bool,
    gravity: f32,
    floor_height: f32,
}

impl KinematicMotor {
    pub const DEFAULT_FLOOR: f32 = 0.0;

    pub fn with_floor(mut self, floor_height: f32) -> Self {
        self.floor_height = floor_height;
        self.grounded = self.pose.position.y <= floor_height;
        self
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }
}

impl Motor for KinematicMotor {
    fn spawn(pose: Pose, config: &ControllerConfig) -> Self {
        Self {
            pose,
            vertical_velocity: 0.0,
            grounded: pose.position.y <= Self::DEFAULT_FLOOR,
            gravity: config.gravity,
            floor_height: Self::DEFAULT_FLOOR,
        }
    }

    fn pose(&self) -> Pose {
        self.pose
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn step(&mut self, horizontal_velocity: Vec3, jump_impulse: f32, dt: f32) {
        if jump_impulse > 0.0 {
            self.vertical_velocity = jump_impulse;
        } else if self.grounded {
            self.vertical_velocity = 0.0;
        }
        self.vertical_velocity += self.gravity * dt;

        let mut position = self.pose.position + horizontal_velocity.with_y(0.0) * dt;
        position.y += self.vertical_velocity * dt;

        if position.y <= self.floor_height {
            position.y = self.floor_height;
            self.vertical_velocity = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
        self.pose.position = position;
    }

    fn teleport(&mut self, pose: Pose, grounded: bool) {
        self.pose = pose;
        self.grounded = grounded;
        self.vertical_velocity = 0.0;
    }
}
