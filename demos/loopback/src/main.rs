//! A whole session in one process: loopback connect, a host with a local
//! keyboard, two scripted remote players, and an observer fed through the
//! codec. A 7 ms render loop feeds a fixed-step clock at the configured
//! tick rate. Run with `RUST_LOG=debug` to see every lifecycle transition.
//!
//! Pass a JSON file path to override [`HostConfig`] defaults.

use std::time::Duration;

use climbnet::prelude::*;
use climbnet::session::{LoopbackBehavior, LoopbackScenes, LoopbackTransport};
use tokio::time::MissedTickBehavior;
use tracing::info;

const LOCAL: ParticipantId = ParticipantId(1);
const STRAFER: ParticipantId = ParticipantId(2);
const VISITOR: ParticipantId = ParticipantId(3);
const TOTAL_TICKS: u64 = 180;
const RENDER_FRAME: Duration = Duration::from_millis(7);

// ---------------------------------------------------------------------------
// Scripts
// ---------------------------------------------------------------------------

/// Local keyboard for a given tick: walk forward, jump once, strafe right.
fn local_keys(tick: u64) -> KeyboardFrame {
    match tick {
        0..60 => KeyboardFrame::new().hold(Keys::W),
        60 => KeyboardFrame::new().hold(Keys::W).press(Keys::SPACE),
        61..120 => KeyboardFrame::new().hold(Keys::W).hold(Keys::SPACE),
        _ => KeyboardFrame::new().hold(Keys::D),
    }
}

fn log_observed(observer: &Observer, tick: u64) {
    for participant in [LOCAL, STRAFER, VISITOR] {
        if let Some(state) = observer.state_of(&participant) {
            info!(
                tick,
                %participant,
                x = state.pose.position.x,
                y = state.pose.position.y,
                z = state.pose.position.z,
                grounded = state.grounded,
                "observed"
            );
        }
    }
}

/// The strafer walks left, but every fifth record is lost in transit.
fn strafer_input(tick: u64) -> Option<InputRecord> {
    (tick % 5 != 0).then(|| InputRecord::new(Vec2::NEG_X, Buttons::empty()))
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => HostConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => HostConfig::default(),
    };

    let lifecycle = ConnectionLifecycle::new(
        config.lifecycle.clone(),
        LoopbackTransport::new(LoopbackBehavior::Succeed),
        LoopbackScenes::new(2),
    );
    let connected = lifecycle
        .connect(ConnectArgs {
            creating: true,
            session: None,
            region: "eu".into(),
            max_players: config.roster.capacity,
            app_version: env!("CARGO_PKG_VERSION").into(),
            scene: SceneRef::new("Climb", "Scenes/Climb"),
        })
        .await?;
    if !connected.success {
        info!(reason = ?connected.fail_reason, "could not start a session");
        return Ok(());
    }
    info!(session = ?connected.session_name, "session up");

    let mut clock = FixedStepClock::new(config.tick.clone());
    let mut host: Host = Host::new(config.clone(), LOCAL, JsonCodec);
    let mut observer: Observer = Observer::new(config.controller, JsonCodec);

    host.join(LOCAL)?;
    host.join(STRAFER)?;

    // Render frames come faster than ticks; the clock decides how many
    // ticks each frame owes.
    let mut frames = tokio::time::interval(RENDER_FRAME);
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_frame = frames.tick().await;
    let mut frame_count = 0u64;

    while clock.tick() < TOTAL_TICKS {
        let now = frames.tick().await;
        let delta = now - last_frame;
        last_frame = now;
        frame_count += 1;

        host.sample_frame(Some(&local_keys(clock.tick())));

        for _ in 0..clock.advance(delta) {
            let tick = host.world().tick();
            match tick {
                30 => {
                    host.join(VISITOR)?;
                }
                90 => {
                    host.leave(VISITOR);
                }
                _ => {}
            }

            if let Some(record) = strafer_input(tick) {
                host.deliver_input(STRAFER, record);
            }
            for outcome in host.step() {
                if outcome.jumped {
                    info!(tick, entity = %outcome.entity, "jump");
                }
            }
            for bytes in host.encode_replication()? {
                observer.receive(&bytes)?;
            }

            if tick % 30 == 0 {
                log_observed(&observer, tick);
            }
        }
    }

    info!(
        ticks = clock.tick(),
        frames = frame_count,
        dropped = clock.dropped(),
        ping_ms = lifecycle.ping_ms(),
        "run finished"
    );

    host.shutdown();
    lifecycle.disconnect(ConnectFailReason::UserRequest).await?;
    Ok(())
}
