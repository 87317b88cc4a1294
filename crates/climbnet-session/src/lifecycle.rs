//! The connect/disconnect state machine.
//!
//! ```text
//!   Idle ──connect──▶ Connecting ──ok──▶ Connected
//!    ▲                    │                 │
//!    │◀──failed/canceled──┘                 │ disconnect
//!    │                                      ▼
//!    └──── SceneUnloading ◀────────── Disconnecting
//! ```
//!
//! At most one connect runs at a time. A second connect while one is in
//! flight returns [`SessionError::ReentrantConnect`] before touching any
//! state. Disconnect first cancels an in-flight connect, then waits for it
//! to let go of the transport.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    ConnectArgs, ConnectFailReason, LifecycleConfig, OnlineRegion, PeerMode, SceneHost,
    SessionCode, SessionError, SessionTransport, ShutdownReason, StartArgs, StartResult,
};

/// Where the lifecycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecyclePhase {
    #[default]
    Idle,
    Connecting,
    Connected,
    Disconnecting,
    SceneUnloading,
}

/// Result of [`ConnectionLifecycle::connect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectResult {
    pub success: bool,
    pub fail_reason: ConnectFailReason,
    /// Session that was joined or created, on success.
    pub session_name: Option<String>,
}

/// What the menu layer should do after a transport shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownFollowUp {
    /// Nothing to do; the shutdown was expected.
    None,
    /// The remote side closed the session; the lifecycle has disconnected
    /// and the menu should return to its main screen.
    ReturnToMainMenu,
}

/// Details of the current (or last) session, for menus and HUDs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionInfo {
    pub session_name: Option<String>,
    pub max_players: usize,
    pub region: String,
    pub app_version: String,
    pub usernames: Vec<String>,
}

struct Backend<T, S> {
    transport: T,
    scenes: S,
}

/// Clears the in-flight flag however `connect` exits.
struct ConnectGuard<'a>(&'a AtomicBool);

impl Drop for ConnectGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives a [`SessionTransport`] and a [`SceneHost`] through connect and
/// disconnect.
///
/// All methods take `&self`, so one lifecycle can be shared between a menu
/// task that connects and a task that cancels.
pub struct ConnectionLifecycle<T, S> {
    config: LifecycleConfig,
    connecting: AtomicBool,
    phase: Mutex<LifecyclePhase>,
    cancel: Mutex<CancellationToken>,
    info: Mutex<ConnectionInfo>,
    backend: tokio::sync::Mutex<Backend<T, S>>,
}

impl<T: SessionTransport, S: SceneHost> ConnectionLifecycle<T, S> {
    pub fn new(config: LifecycleConfig, transport: T, scenes: S) -> Self {
        Self {
            config: config.validated(),
            connecting: AtomicBool::new(false),
            phase: Mutex::new(LifecyclePhase::Idle),
            cancel: Mutex::new(CancellationToken::new()),
            info: Mutex::new(ConnectionInfo::default()),
            backend: tokio::sync::Mutex::new(Backend { transport, scenes }),
        }
    }

    // ---- Connect ----

    /// Creates or joins a session.
    ///
    /// A running session is shut down first. Cancellation (via
    /// [`cancel`](Self::cancel) or [`disconnect`](Self::disconnect)) ends
    /// the attempt with `success: false` and
    /// [`ConnectFailReason::UserRequest`].
    pub async fn connect(&self, args: ConnectArgs) -> Result<ConnectResult, SessionError> {
        if self.connecting.swap(true, Ordering::AcqRel) {
            warn!(region = %args.region, "connect rejected: another connect is in flight");
            return Err(SessionError::ReentrantConnect);
        }
        let _guard = ConnectGuard(&self.connecting);

        let token = CancellationToken::new();
        *lock(&self.cancel) = token.clone();

        let mut backend = self.backend.lock().await;
        if backend.transport.is_running() {
            info!("shutting down running session before connecting");
            backend.transport.shutdown(ShutdownReason::Ok).await;
        }
        if token.is_cancelled() {
            return Ok(self.finish_connect(StartResult::canceled(), None));
        }

        self.set_phase(LifecyclePhase::Connecting);

        let mode = args.game_mode(&self.config.shared_scene_marker);
        let max_players = match args.max_players {
            0 => self.config.default_max_players,
            n => n,
        };
        let region_index = self.config.region_index(&args.region).unwrap_or(0);
        let generated = SessionCode::generate(region_index);

        {
            let mut info = lock(&self.info);
            info.session_name = args.session_name().map(str::to_owned);
            info.max_players = max_players;
            info.region = args.region.clone();
            info.app_version = args.app_version.clone();
        }

        let start = StartArgs {
            mode,
            session_name: args.session_name().map(str::to_owned),
            generated_session_name: generated.into(),
            max_players,
            region: args.region.clone(),
            app_version: args.app_version.clone(),
            scene: args.scene.clone(),
        };
        info!(
            ?mode,
            region = %args.region,
            max_players,
            scene = %args.scene.name,
            "connecting"
        );

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => StartResult::canceled(),
            result = backend.transport.start(start, token.clone()) => result,
        };

        // A transport that ignored cancellation may have come up anyway.
        if token.is_cancelled() && backend.transport.is_running() {
            backend.transport.shutdown(ShutdownReason::OperationCanceled).await;
        }
        let session_name = backend.transport.session_name();
        let result = if token.is_cancelled() {
            StartResult::canceled()
        } else {
            result
        };
        Ok(self.finish_connect(result, session_name))
    }

    fn finish_connect(&self, result: StartResult, session_name: Option<String>) -> ConnectResult {
        if result.ok {
            lock(&self.info).session_name = session_name.clone();
            self.set_phase(LifecyclePhase::Connected);
            info!(session = ?session_name, "connected");
            ConnectResult {
                success: true,
                fail_reason: ConnectFailReason::None,
                session_name,
            }
        } else {
            self.set_phase(LifecyclePhase::Idle);
            let fail_reason = ConnectFailReason::from(result.shutdown_reason);
            match result.shutdown_reason {
                ShutdownReason::OperationCanceled => info!("connect canceled"),
                reason => warn!(
                    ?reason,
                    detail = result.error_message.as_deref().unwrap_or(""),
                    "connect failed"
                ),
            }
            ConnectResult {
                success: false,
                fail_reason,
                session_name: None,
            }
        }
    }

    /// Cancels an in-flight connect. Does nothing otherwise.
    pub fn cancel(&self) {
        let token = lock(&self.cancel).clone();
        if !token.is_cancelled() && self.is_connecting() {
            debug!("canceling in-flight connect");
        }
        token.cancel();
    }

    // ---- Disconnect ----

    /// Leaves the session and unloads its scenes.
    pub async fn disconnect(&self, reason: ConnectFailReason) -> Result<(), SessionError> {
        self.disconnect_with_cancel(reason, &CancellationToken::new())
            .await
    }

    /// Like [`disconnect`](Self::disconnect), but `abort` stops the scene
    /// unloading between scenes. The lifecycle still ends in
    /// [`LifecyclePhase::Idle`].
    ///
    /// Scene unload failures are logged and skipped; the first one is
    /// returned once the lifecycle is idle again.
    pub async fn disconnect_with_cancel(
        &self,
        reason: ConnectFailReason,
        abort: &CancellationToken,
    ) -> Result<(), SessionError> {
        let in_flight = self.is_connecting();
        self.cancel();

        let mut backend = self.backend.lock().await;
        if !in_flight && !backend.transport.is_running() && self.phase() == LifecyclePhase::Idle
        {
            debug!(?reason, "disconnect ignored: no session");
            return Err(SessionError::NotConnected);
        }

        info!(?reason, "disconnecting");
        self.set_phase(LifecyclePhase::Disconnecting);
        let peer_mode = backend.transport.peer_mode();
        backend.transport.shutdown(ShutdownReason::from(reason)).await;

        let mut first_error = None;
        if peer_mode == PeerMode::Multiple {
            debug!("multi-peer process, leaving scenes loaded");
        } else if !abort.is_cancelled() {
            self.set_phase(LifecyclePhase::SceneUnloading);
            for index in (1..backend.scenes.scene_count()).rev() {
                if abort.is_cancelled() {
                    debug!(index, "scene unloading aborted");
                    break;
                }
                if let Err(e) = backend.scenes.unload_scene(index).await {
                    warn!(index, error = %e, "scene unload failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        self.set_phase(LifecyclePhase::Idle);
        info!("disconnected");
        first_error.map_or(Ok(()), Err)
    }

    /// Reacts to the transport ending the session on its own.
    ///
    /// A shutdown by remote policy disconnects fully and asks the menu to
    /// return to main. Other reasons only mark the lifecycle idle.
    pub async fn on_shutdown(&self, reason: ShutdownReason) -> ShutdownFollowUp {
        info!(?reason, "session shut down by transport");
        match reason {
            ShutdownReason::DisconnectedByPluginLogic => {
                match self.disconnect(ConnectFailReason::Disconnect).await {
                    Ok(()) | Err(SessionError::NotConnected) => {}
                    Err(e) => warn!(error = %e, "disconnect after remote shutdown failed"),
                }
                ShutdownFollowUp::ReturnToMainMenu
            }
            _ => {
                if self.phase() == LifecyclePhase::Connected {
                    self.set_phase(LifecyclePhase::Idle);
                }
                ShutdownFollowUp::None
            }
        }
    }

    // ---- Info ----

    /// The region picker's choices. Region selection is left to the
    /// transport, so this is a single "best region" entry.
    pub fn request_available_regions(&self) -> Vec<OnlineRegion> {
        vec![OnlineRegion {
            code: String::new(),
            ping_ms: 0,
        }]
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    pub fn phase(&self) -> LifecyclePhase {
        *lock(&self.phase)
    }

    fn set_phase(&self, phase: LifecyclePhase) {
        let mut current = lock(&self.phase);
        if *current != phase {
            debug!(from = ?*current, to = ?phase, "lifecycle phase");
            *current = phase;
        }
    }

    pub fn is_connecting(&self) -> bool {
        self.connecting.load(Ordering::Acquire)
    }

    pub fn is_connected(&self) -> bool {
        self.phase() == LifecyclePhase::Connected
    }

    /// Round-trip time in milliseconds; 0 when not connected or while the
    /// transport is busy connecting or disconnecting.
    pub fn ping_ms(&self) -> u32 {
        if !self.is_connected() {
            return 0;
        }
        let Ok(backend) = self.backend.try_lock() else {
            return 0;
        };
        backend
            .transport
            .round_trip_time()
            .map_or(0, |rtt| (rtt.as_secs_f64() * 1000.0) as u32)
    }

    pub fn info(&self) -> ConnectionInfo {
        lock(&self.info).clone()
    }

    pub fn session_name(&self) -> Option<String> {
        lock(&self.info).session_name.clone()
    }

    pub fn max_players(&self) -> usize {
        lock(&self.info).max_players
    }

    pub fn region(&self) -> String {
        lock(&self.info).region.clone()
    }

    pub fn app_version(&self) -> String {
        lock(&self.info).app_version.clone()
    }

    pub fn usernames(&self) -> Vec<String> {
        lock(&self.info).usernames.clone()
    }

    pub fn set_usernames(&self, usernames: Vec<String>) {
        lock(&self.info).usernames = usernames;
    }
}
