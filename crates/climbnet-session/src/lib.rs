//! Connection lifecycle for climbnet.
//!
//! climbnet does not implement matchmaking or a network transport. This
//! crate is the glue between a "connect with these settings" request and
//! whatever session transport does the real work:
//!
//! 1. **Mode selection**: [`ConnectArgs::game_mode`] picks host, client,
//!    shared or auto mode from the request
//! 2. **Reason translation**: [`ShutdownReason`] ↔ [`ConnectFailReason`]
//! 3. **Lifecycle**: [`ConnectionLifecycle`] runs one connect at a time,
//!    supports cancellation, and tears sessions down in explicit phases
//!
//! The transport and scene loader are traits ([`SessionTransport`],
//! [`SceneHost`]); [`LoopbackTransport`] and [`LoopbackScenes`] are
//! in-process stand-ins for tests and demos.

#![allow(async_fn_in_trait)]

mod args;
mod code;
mod config;
mod error;
mod lifecycle;
mod loopback;
mod reason;
mod transport;

pub use args::{ConnectArgs, GameMode, SceneRef};
pub use code::SessionCode;
pub use config::LifecycleConfig;
pub use error::SessionError;
pub use lifecycle::{
    ConnectResult, ConnectionInfo, ConnectionLifecycle, LifecyclePhase, ShutdownFollowUp,
};
pub use loopback::{LoopbackBehavior, LoopbackProbe, LoopbackScenes, LoopbackTransport};
pub use reason::{ConnectFailReason, ShutdownReason};
pub use transport::{OnlineRegion, PeerMode, SceneHost, SessionTransport, StartArgs, StartResult};
pub use tokio_util::sync::CancellationToken;
