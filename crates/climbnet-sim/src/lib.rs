//! Fixed-step player simulation for climbnet.
//!
//! The authority runs [`World::step`] once per tick. Each step takes at most
//! one buffered [`InputRecord`](climbnet_protocol::InputRecord) per
//! participant from the [`InputMailbox`], feeds it to that participant's
//! [`PlayerController`], and lets the [`Motor`] integrate the result.
//!
//! Observers never step; they apply [`WorldSnapshot`](climbnet_protocol::WorldSnapshot)s
//! from the authority instead.

mod config;
mod controller;
mod mailbox;
mod motor;
mod world;

pub use config::ControllerConfig;
pub use controller::{InputSource, PlayerController, TickOutcome};
pub use mailbox::InputMailbox;
pub use motor::{KinematicMotor, Motor};
pub use world::World;
