//! Seams to the session transport and the scene loader.
//!
//! Both traits use `async fn` directly. Implementations are owned by a
//! [`ConnectionLifecycle`](crate::ConnectionLifecycle), which serializes
//! every call behind one lock, so `&mut self` is fine.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::{GameMode, SceneRef, SessionError, ShutdownReason};

/// How many simulation peers share this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PeerMode {
    /// One peer per process; the usual case.
    #[default]
    Single,
    /// Several peers in one process (local multi-client testing). Scenes
    /// belong to the whole process, so disconnect leaves them loaded.
    Multiple,
}

/// One entry of the region picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineRegion {
    /// Region code; empty means "best region".
    pub code: String,
    pub ping_ms: u32,
}

/// Everything the transport needs to start a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartArgs {
    pub mode: GameMode,
    /// Session to join or create, if the caller named one.
    pub session_name: Option<String>,
    /// Name to use when creating without an explicit one.
    pub generated_session_name: String,
    pub max_players: usize,
    pub region: String,
    pub app_version: String,
    pub scene: SceneRef,
}

/// Result of [`SessionTransport::start`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartResult {
    pub ok: bool,
    pub shutdown_reason: ShutdownReason,
    pub error_message: Option<String>,
}

impl StartResult {
    pub fn ok() -> Self {
        Self {
            ok: true,
            shutdown_reason: ShutdownReason::Ok,
            error_message: None,
        }
    }

    pub fn failed(reason: ShutdownReason) -> Self {
        Self {
            ok: false,
            shutdown_reason: reason,
            error_message: None,
        }
    }

    pub fn canceled() -> Self {
        Self::failed(ShutdownReason::OperationCanceled)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }
}

/// A session transport: matchmaking, connection and replication plumbing.
///
/// ## `async fn` in a trait
///
/// The methods are written as plain `async fn`. Each implementation gets
/// its own anonymous future type, and callers are generic over `T:
/// SessionTransport`, so no boxing is involved. The lint
/// `async_fn_in_trait` is allowed at the crate root: it warns that callers
/// can't add a `Send` bound to those futures, which is fine while
/// [`ConnectionLifecycle`](crate::ConnectionLifecycle) awaits them in
/// place.
///
/// ## Trait bounds explained
///
/// - `Send` → the transport can move to another tokio worker thread
///   between `.await` points.
/// - `'static` → it owns its connection state, so the lifecycle can keep
///   it behind a `tokio::sync::Mutex` for as long as it lives.
///
/// ## Cancellation
///
/// `start` receives a [`CancellationToken`] instead of being dropped
/// mid-flight. The implementation checks it at its own suspension points
/// and returns [`StartResult::canceled`] once it has torn down whatever it
/// had opened.
pub trait SessionTransport: Send + 'static {
    /// Starts (creates or joins) a session.
    ///
    /// Implementations should watch `cancel` at their own suspension points
    /// and return [`StartResult::canceled`] when it fires.
    async fn start(&mut self, args: StartArgs, cancel: CancellationToken) -> StartResult;

    /// Ends the running session. A no-op when nothing is running.
    async fn shutdown(&mut self, reason: ShutdownReason);

    fn is_running(&self) -> bool;

    /// Name of the running session, once the transport knows it.
    fn session_name(&self) -> Option<String>;

    /// Round-trip time to the session authority.
    fn round_trip_time(&self) -> Option<Duration>;

    fn peer_mode(&self) -> PeerMode;
}

/// Loads and unloads scenes. Index 0 is the menu scene and is never unloaded.
pub trait SceneHost: Send + 'static {
    fn scene_count(&self) -> usize;

    async fn unload_scene(&mut self, index: usize) -> Result<(), SessionError>;
}
