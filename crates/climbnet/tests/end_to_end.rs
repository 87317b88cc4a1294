//! Host and observer wired together through encoded replication messages.

use climbnet::prelude::*;
use climbnet::roster::RosterError;
use climbnet::session::{LoopbackBehavior, LoopbackScenes, LoopbackTransport};

const EPS: f32 = 1e-3;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPS
}

fn pid(id: u32) -> ParticipantId {
    ParticipantId(id)
}

fn pump(host: &mut Host, observer: &mut Observer) {
    for bytes in host.encode_replication().unwrap() {
        observer.receive(&bytes).unwrap();
    }
}

// =========================================================================
// Host + observer
// =========================================================================

#[test]
fn test_observer_mirrors_host_movement() {
    let mut host: Host = Host::new(HostConfig::default(), pid(1), JsonCodec);
    let mut observer: Observer = Observer::new(ControllerConfig::default(), JsonCodec);

    host.join(pid(1)).unwrap();
    host.join(pid(2)).unwrap();
    let held_w = KeyboardFrame::new().hold(Keys::W);

    for _ in 0..60 {
        host.sample_frame(Some(&held_w));
        host.deliver_input(pid(2), InputRecord::new(Vec2::X, Buttons::empty()));
        host.step();
        pump(&mut host, &mut observer);
    }

    let local = observer.state_of(&pid(1)).expect("local replicated");
    let remote = observer.state_of(&pid(2)).expect("remote replicated");
    assert!(approx(local.pose.position.z, 5.0), "W moves forward: {:?}", local.pose);
    assert!(approx(local.pose.position.x, 0.0));
    assert!(approx(remote.pose.position.x, 5.0), "right strafes: {:?}", remote.pose);
    assert!(approx(remote.pose.position.z, 0.0));
    assert_eq!(observer.world().tick(), 60);
}

#[test]
fn test_late_observer_catches_up() {
    let mut host: Host = Host::new(HostConfig::default(), pid(1), JsonCodec);
    host.join(pid(1)).unwrap();
    host.join(pid(2)).unwrap();
    host.join(pid(3)).unwrap();
    host.leave(pid(2));
    for _ in 0..10 {
        host.step();
    }
    // Deltas already went to someone else.
    host.replicate();

    let mut late: Observer = Observer::new(ControllerConfig::default(), JsonCodec);
    for bytes in host.encode_catch_up().unwrap() {
        late.receive(&bytes).unwrap();
    }

    assert_eq!(late.roster().len(), 2);
    assert!(late.state_of(&pid(2)).is_none());
    let entity = host.roster().entity_of(&pid(3)).unwrap();
    assert_eq!(late.state_of(&pid(3)), host.world().state_of(entity));
}

#[test]
fn test_observer_drops_departed_player() {
    let mut host: Host = Host::new(HostConfig::default(), pid(1), JsonCodec);
    let mut observer: Observer = Observer::new(ControllerConfig::default(), JsonCodec);
    host.join(pid(1)).unwrap();
    host.join(pid(2)).unwrap();
    host.step();
    pump(&mut host, &mut observer);
    assert!(observer.state_of(&pid(2)).is_some());

    host.leave(pid(2));
    host.step();
    pump(&mut host, &mut observer);

    assert!(observer.state_of(&pid(2)).is_none());
    assert_eq!(observer.world().len(), 1);
}

#[test]
fn test_observer_rejects_garbage() {
    let mut observer: Observer = Observer::new(ControllerConfig::default(), JsonCodec);
    let err = observer.receive(b"{nope").unwrap_err();
    assert!(matches!(err, ClimbnetError::Protocol(_)));
}

// =========================================================================
// Roster limits and missing input
// =========================================================================

#[test]
fn test_join_beyond_capacity_is_error() {
    let config = HostConfig::from_json(r#"{ "roster": { "capacity": 2 } }"#).unwrap();
    let mut host: Host = Host::new(config, pid(1), JsonCodec);
    host.join(pid(1)).unwrap();
    host.join(pid(2)).unwrap();

    let err = host.join(pid(3)).unwrap_err();
    assert!(matches!(
        err,
        ClimbnetError::Roster(RosterError::CapacityExceeded { capacity: 2, .. })
    ));
    assert_eq!(host.world().len(), 2, "rejected join spawns nothing");
}

#[test]
fn test_remote_without_input_stays_put() {
    let mut host: Host = Host::new(HostConfig::default(), pid(1), JsonCodec);
    host.join(pid(2)).unwrap();
    let entity = host.roster().entity_of(&pid(2)).unwrap();
    for _ in 0..60 {
        host.step();
    }
    let before = host.world().state_of(entity).unwrap().pose.position;

    let outcomes = host.step();

    assert_eq!(outcomes.len(), 1);
    assert!(!outcomes[0].jumped);
    assert_eq!(outcomes[0].displacement, Vec3::ZERO);
    assert_eq!(host.world().state_of(entity).unwrap().pose.position, before);
}

#[test]
fn test_local_jump_tap_between_ticks() {
    let mut host: Host = Host::new(HostConfig::default(), pid(1), JsonCodec);
    host.join(pid(1)).unwrap();
    for _ in 0..60 {
        host.sample_frame(Some(&KeyboardFrame::new()));
        host.step();
    }

    // Space is down for one frame only, then released before the tick.
    host.sample_frame(Some(&KeyboardFrame::new().press(Keys::SPACE)));
    host.sample_frame(Some(&KeyboardFrame::new()));
    let outcomes = host.step();

    assert!(outcomes[0].jumped);
}

#[test]
fn test_input_held_before_local_join_does_not_move_first_tick() {
    let mut host: Host = Host::new(HostConfig::default(), pid(1), JsonCodec);
    host.sample_frame(Some(&KeyboardFrame::new().press(Keys::ENTER)));
    for _ in 0..500 {
        host.sample_frame(Some(&KeyboardFrame::new().hold(Keys::D).press(Keys::SPACE)));
    }

    host.join(pid(1)).unwrap();
    host.sample_frame(Some(&KeyboardFrame::new()));
    let outcomes = host.step();

    assert_eq!(outcomes.len(), 1);
    assert!(!outcomes[0].jumped);
    assert_eq!(outcomes[0].displacement.with_y(0.0), Vec3::ZERO);
}

// =========================================================================
// Shutdown
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_remote_shutdown_releases_capture_and_returns_to_menu() {
    let mut host: Host = Host::new(HostConfig::default(), pid(1), JsonCodec);
    host.join(pid(1)).unwrap();
    assert!(host.sampler().is_captured());

    let lifecycle = ConnectionLifecycle::new(
        LifecycleConfig::default(),
        LoopbackTransport::new(LoopbackBehavior::Succeed),
        LoopbackScenes::new(2),
    );
    let args = ConnectArgs {
        creating: true,
        session: None,
        region: "eu".into(),
        max_players: 4,
        app_version: "1.0".into(),
        scene: SceneRef::new("Climb", "Scenes/Climb"),
    };
    assert!(lifecycle.connect(args).await.unwrap().success);

    host.shutdown();
    let follow_up = lifecycle
        .on_shutdown(ShutdownReason::DisconnectedByPluginLogic)
        .await;

    assert!(!host.sampler().is_captured());
    assert_eq!(follow_up, ShutdownFollowUp::ReturnToMainMenu);
    assert!(!lifecycle.is_connected());
}
