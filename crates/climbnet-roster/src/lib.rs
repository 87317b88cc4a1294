//! Session roster for climbnet.
//!
//! The roster answers one question: which entity does each connected
//! participant control? Only the authority may change the answer.
//!
//! # Key types
//!
//! - [`SessionRoster`]: the authority's mapping, driven by join/leave events
//! - [`RosterReplica`]: an observer's read-only mirror, driven by
//!   [`RosterDelta`](climbnet_protocol::RosterDelta)s
//! - [`EntitySpawner`]: the world that actually creates and destroys entities
//! - [`Role`]: whether this process holds authority
//! - [`RosterConfig`]: capacity and spawn pose
//!
//! ```text
//! transport ──join/leave──→ SessionRoster ──spawn/despawn──→ EntitySpawner
//!                                │
//!                                └──RosterDelta──→ RosterReplica (observers)
//! ```

mod config;
mod error;
mod replica;
mod roster;
mod spawner;

pub use config::{Role, RosterConfig};
pub use error::RosterError;
pub use replica::RosterReplica;
pub use roster::{JoinOutcome, LeaveOutcome, SessionRoster};
pub use spawner::EntitySpawner;
