//! The authoritative side: roster, simulation and local input in one place.

use climbnet_input::{InputSampler, KeyboardFrame};
use climbnet_protocol::{
    Codec, InputRecord, JsonCodec, ParticipantId, ReplicationMessage,
};
use climbnet_roster::{JoinOutcome, LeaveOutcome, Role, SessionRoster};
use climbnet_sim::{InputMailbox, KinematicMotor, Motor, TickOutcome, World};
use tracing::{debug, info};

use crate::{ClimbnetError, HostConfig};

/// The process with authority over a session.
///
/// Call order per rendered frame:
///
/// 1. [`sample_frame`](Self::sample_frame) with the local keyboard
/// 2. [`deliver_input`](Self::deliver_input) for every remote record that
///    arrived
/// 3. [`step`](Self::step) once per fixed tick the frame owes (see
///    [`FixedStepClock`](climbnet_tick::FixedStepClock))
/// 4. [`encode_replication`](Self::encode_replication) and hand the bytes
///    to the transport
pub struct Host<M: Motor = KinematicMotor, C: Codec = JsonCodec> {
    roster: SessionRoster,
    world: World<M>,
    mailbox: InputMailbox,
    sampler: InputSampler,
    local: ParticipantId,
    codec: C,
    dt: f32,
}

impl<M: Motor, C: Codec> Host<M, C> {
    /// Creates a host whose own player is `local`. The local player still
    /// has to [`join`](Self::join) like everyone else.
    pub fn new(config: HostConfig, local: ParticipantId, codec: C) -> Self {
        let config = config.validated();
        let dt = config.tick.tick_duration().as_secs_f32();
        info!(
            %local,
            capacity = config.roster.capacity,
            tick_rate_hz = config.tick.tick_rate_hz,
            "host created"
        );
        Self {
            roster: SessionRoster::new(Role::Authority, config.roster),
            world: World::new(Role::Authority, config.controller),
            mailbox: InputMailbox::new(),
            sampler: InputSampler::new(),
            local,
            codec,
            dt,
        }
    }

    // ---- Roster ----

    /// Adds a participant. The local participant's join also captures the
    /// keyboard.
    ///
    /// # Errors
    /// [`ClimbnetError::Roster`] when the session is full.
    pub fn join(&mut self, participant: ParticipantId) -> Result<JoinOutcome, ClimbnetError> {
        let outcome = self.roster.on_join(participant, &mut self.world)?;
        if participant == self.local && matches!(outcome, JoinOutcome::Spawned(_)) {
            self.sampler.on_local_join();
        }
        Ok(outcome)
    }

    /// Removes a participant. Repeated leaves are harmless.
    pub fn leave(&mut self, participant: ParticipantId) -> LeaveOutcome {
        let outcome = self.roster.on_leave(participant, &mut self.world);
        if participant == self.local && matches!(outcome, LeaveOutcome::Despawned(_)) {
            self.sampler.release();
        }
        outcome
    }

    // ---- Input ----

    /// Feeds one rendered frame of local keyboard state. `None` when the
    /// platform has no keyboard.
    pub fn sample_frame(&mut self, keyboard: Option<&KeyboardFrame>) {
        self.sampler.sample_frame(keyboard);
    }

    /// Buffers a remote participant's record for the next tick.
    ///
    /// Returns `true` if it replaced a record that was never simulated.
    /// Input from participants not on the roster is dropped.
    pub fn deliver_input(&mut self, participant: ParticipantId, record: InputRecord) -> bool {
        if !self.roster.contains(&participant) {
            debug!(%participant, "input from participant not on roster dropped");
            return false;
        }
        self.mailbox.deliver(participant, record)
    }

    // ---- Simulation ----

    /// Runs one fixed tick: flushes local input into the mailbox, then
    /// steps every entity.
    ///
    /// The sampler is flushed on every tick boundary. Until the local
    /// participant has joined, the flushed record is dropped.
    pub fn step(&mut self) -> Vec<TickOutcome> {
        let record = self.sampler.flush();
        if self.roster.contains(&self.local) {
            self.mailbox.deliver(self.local, record);
        }
        self.world.step(&mut self.mailbox, self.dt)
    }

    /// Releases the keyboard when the session ends.
    pub fn shutdown(&mut self) {
        debug!("host shutting down, releasing input capture");
        self.sampler.release();
    }

    // ---- Replication ----

    /// Roster changes since the last call, followed by the current world
    /// state.
    pub fn replicate(&mut self) -> Vec<ReplicationMessage> {
        let mut messages: Vec<ReplicationMessage> = self
            .roster
            .drain_deltas()
            .into_iter()
            .map(ReplicationMessage::Delta)
            .collect();
        messages.push(ReplicationMessage::World(self.world.snapshot()));
        messages
    }

    /// [`replicate`](Self::replicate), encoded with the host's codec.
    ///
    /// # Errors
    /// [`ClimbnetError::Protocol`] if a message cannot be encoded.
    pub fn encode_replication(&mut self) -> Result<Vec<Vec<u8>>, ClimbnetError> {
        self.replicate()
            .iter()
            .map(|msg| self.codec.encode(msg).map_err(ClimbnetError::from))
            .collect()
    }

    /// Full state for an observer that joins mid-session: the roster
    /// snapshot, then the world snapshot.
    ///
    /// # Errors
    /// [`ClimbnetError::Protocol`] if a message cannot be encoded.
    pub fn encode_catch_up(&self) -> Result<Vec<Vec<u8>>, ClimbnetError> {
        let roster = ReplicationMessage::Roster(self.roster.snapshot());
        let world = ReplicationMessage::World(self.world.snapshot());
        Ok(vec![self.codec.encode(&roster)?, self.codec.encode(&world)?])
    }

    // ---- Accessors ----

    pub fn local(&self) -> ParticipantId {
        self.local
    }

    pub fn roster(&self) -> &SessionRoster {
        &self.roster
    }

    pub fn world(&self) -> &World<M> {
        &self.world
    }

    pub fn sampler(&self) -> &InputSampler {
        &self.sampler
    }

    pub fn mailbox(&self) -> &InputMailbox {
        &self.mailbox
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}
