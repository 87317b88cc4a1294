//! Shared vocabulary for climbnet.
//!
//! Everything that crosses a boundary between the input pipeline, the
//! authority and its observers lives here:
//!
//! - **Identity** ([`ParticipantId`], [`EntityId`])
//! - **Math** ([`Vec2`], [`Vec3`] from `glam`, yaw-only [`Pose`])
//! - **Input** ([`InputRecord`], [`Buttons`])
//! - **Replication** ([`RosterDelta`], [`RosterSnapshot`], [`WorldSnapshot`],
//!   [`ReplicationMessage`]): how the authority's state reaches observers
//! - **Codec** ([`Codec`], [`JsonCodec`]): bytes in, bytes out
//!
//! ```text
//! InputSampler ──InputRecord──→ Authority ──ReplicationMessage──→ Observers
//! ```

mod codec;
mod error;
mod input;
mod math;
mod replication;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use input::{Buttons, InputRecord};
pub use math::{Pose, Quat, Vec2, Vec3, ground_direction};
pub use replication::{
    EntityState, ReplicationMessage, RosterDelta, RosterEntry, RosterSnapshot,
    WorldSnapshot,
};
pub use types::{EntityId, ParticipantId, Tick};
