//! In-process transport and scene host.
//!
//! No sockets: a loopback "session" is a flag plus a name. Behavior is
//! scripted per instance and everything the lifecycle asks for is
//! recorded in a shared [`LoopbackProbe`], so tests can inspect it after
//! the transport has been moved into a lifecycle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    PeerMode, SceneHost, SessionError, SessionTransport, ShutdownReason, StartArgs, StartResult,
};

/// What [`LoopbackTransport::start`] does after its start delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopbackBehavior {
    Succeed,
    Fail(ShutdownReason),
    /// Never finish on its own; only cancellation ends the start.
    Hang,
}

#[derive(Debug, Default)]
struct ProbeState {
    starts: Vec<StartArgs>,
    shutdowns: Vec<ShutdownReason>,
    unloaded: Vec<usize>,
}

/// Shared record of the calls made on loopback transports and scenes.
#[derive(Debug, Clone, Default)]
pub struct LoopbackProbe(Arc<Mutex<ProbeState>>);

impl LoopbackProbe {
    fn lock(&self) -> MutexGuard<'_, ProbeState> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Arguments of every `start` call, oldest first.
    pub fn starts(&self) -> Vec<StartArgs> {
        self.lock().starts.clone()
    }

    /// Reasons passed to `shutdown`, oldest first.
    pub fn shutdowns(&self) -> Vec<ShutdownReason> {
        self.lock().shutdowns.clone()
    }

    /// Scene indices unloaded, in unload order.
    pub fn unloaded_scenes(&self) -> Vec<usize> {
        self.lock().unloaded.clone()
    }
}

/// Transport that "connects" without leaving the process.
#[derive(Debug)]
pub struct LoopbackTransport {
    behavior: LoopbackBehavior,
    start_delay: Duration,
    peer_mode: PeerMode,
    rtt: Duration,
    running: bool,
    session_name: Option<String>,
    probe: LoopbackProbe,
}

impl LoopbackTransport {
    pub fn new(behavior: LoopbackBehavior) -> Self {
        Self {
            behavior,
            start_delay: Duration::ZERO,
            peer_mode: PeerMode::Single,
            rtt: Duration::from_millis(20),
            running: false,
            session_name: None,
            probe: LoopbackProbe::default(),
        }
    }

    /// Time `start` takes before applying its behavior.
    pub fn with_start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    pub fn with_peer_mode(mut self, peer_mode: PeerMode) -> Self {
        self.peer_mode = peer_mode;
        self
    }

    pub fn with_rtt(mut self, rtt: Duration) -> Self {
        self.rtt = rtt;
        self
    }

    /// Records into `probe` instead of a private one.
    pub fn with_probe(mut self, probe: LoopbackProbe) -> Self {
        self.probe = probe;
        self
    }

    pub fn probe(&self) -> LoopbackProbe {
        self.probe.clone()
    }

    /// Changes what the next `start` does.
    pub fn set_behavior(&mut self, behavior: LoopbackBehavior) {
        self.behavior = behavior;
    }
}

impl SessionTransport for LoopbackTransport {
    async fn start(&mut self, args: StartArgs, cancel: CancellationToken) -> StartResult {
        self.probe.lock().starts.push(args.clone());

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return StartResult::canceled(),
            _ = tokio::time::sleep(self.start_delay) => {}
        }

        match self.behavior {
            LoopbackBehavior::Succeed => {
                let name = args
                    .session_name
                    .unwrap_or(args.generated_session_name);
                debug!(session = %name, mode = ?args.mode, "loopback session started");
                self.session_name = Some(name);
                self.running = true;
                StartResult::ok()
            }
            LoopbackBehavior::Fail(reason) => {
                StartResult::failed(reason).with_message("scripted loopback failure")
            }
            LoopbackBehavior::Hang => {
                cancel.cancelled().await;
                StartResult::canceled()
            }
        }
    }

    async fn shutdown(&mut self, reason: ShutdownReason) {
        self.probe.lock().shutdowns.push(reason);
        if self.running {
            debug!(?reason, "loopback session shut down");
        }
        self.running = false;
        self.session_name = None;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn session_name(&self) -> Option<String> {
        self.session_name.clone()
    }

    fn round_trip_time(&self) -> Option<Duration> {
        self.running.then_some(self.rtt)
    }

    fn peer_mode(&self) -> PeerMode {
        self.peer_mode
    }
}

/// Scene host with a fixed number of loaded scenes.
#[derive(Debug)]
pub struct LoopbackScenes {
    loaded: usize,
    unload_delay: Duration,
    probe: LoopbackProbe,
}

impl LoopbackScenes {
    /// `loaded` counts the menu scene at index 0.
    pub fn new(loaded: usize) -> Self {
        Self {
            loaded,
            unload_delay: Duration::ZERO,
            probe: LoopbackProbe::default(),
        }
    }

    pub fn with_unload_delay(mut self, delay: Duration) -> Self {
        self.unload_delay = delay;
        self
    }

    pub fn with_probe(mut self, probe: LoopbackProbe) -> Self {
        self.probe = probe;
        self
    }

    /// Pretends the session loaded `count` scenes in total.
    pub fn set_loaded(&mut self, count: usize) {
        self.loaded = count;
    }
}

impl SceneHost for LoopbackScenes {
    fn scene_count(&self) -> usize {
        self.loaded
    }

    async fn unload_scene(&mut self, index: usize) -> Result<(), SessionError> {
        if index == 0 || index >= self.loaded {
            return Err(SessionError::Transport(format!(
                "scene {index} is not unloadable ({} loaded)",
                self.loaded
            )));
        }
        tokio::time::sleep(self.unload_delay).await;
        self.probe.lock().unloaded.push(index);
        self.loaded -= 1;
        Ok(())
    }
}
