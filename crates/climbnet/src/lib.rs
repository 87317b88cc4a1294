//! # climbnet
//!
//! Authoritative movement replication for small multiplayer sessions.
//!
//! One process holds authority. It owns the
//! [roster](climbnet_roster::SessionRoster) of who is playing, spawns an
//! entity per participant, samples the local keyboard every frame, and
//! steps every entity on a fixed tick using whatever input each
//! participant delivered for that tick. Everyone else
//! runs an [`Observer`] that mirrors the authority's replication messages.
//!
//! Connecting, matchmaking and the wire transport sit behind
//! [`SessionTransport`](climbnet_session::SessionTransport);
//! [`ConnectionLifecycle`](climbnet_session::ConnectionLifecycle) drives it.
//!
//! ## Quick Start
//!
//! ```rust
//! use climbnet::prelude::*;
//!
//! let mut host: Host = Host::new(HostConfig::default(), ParticipantId(1), JsonCodec);
//! host.join(ParticipantId(1))?;
//!
//! host.sample_frame(Some(&KeyboardFrame::new().hold(Keys::W)));
//! let outcomes = host.step();
//! assert_eq!(outcomes.len(), 1);
//! # Ok::<(), ClimbnetError>(())
//! ```

mod config;
mod error;
mod host;
mod observer;
mod telemetry;

pub use config::HostConfig;
pub use error::ClimbnetError;
pub use host::Host;
pub use observer::Observer;
pub use telemetry::init_tracing;

pub use climbnet_input as input;
pub use climbnet_protocol as protocol;
pub use climbnet_roster as roster;
pub use climbnet_session as session;
pub use climbnet_sim as sim;
pub use climbnet_tick as tick;

pub mod prelude {
    pub use crate::{ClimbnetError, Host, HostConfig, Observer, init_tracing};
    pub use climbnet_input::{CaptureState, InputSampler, KeyboardFrame, Keys};
    pub use climbnet_protocol::{
        Buttons, Codec, EntityId, EntityState, InputRecord, JsonCodec,
        ParticipantId, Pose, ReplicationMessage, Vec2, Vec3,
    };
    pub use climbnet_roster::{JoinOutcome, LeaveOutcome, Role, RosterConfig, SessionRoster};
    pub use climbnet_session::{
        ConnectArgs, ConnectFailReason, ConnectResult, ConnectionLifecycle, GameMode,
        LifecycleConfig, SceneRef, SessionTransport, ShutdownFollowUp, ShutdownReason,
    };
    pub use climbnet_sim::{ControllerConfig, KinematicMotor, Motor, TickOutcome};
    pub use climbnet_tick::{FixedStepClock, TickConfig};
}
