//! Integration tests for the roster using a bookkeeping spawner.

use std::collections::HashMap;

use climbnet_protocol::{EntityId, ParticipantId, Pose};
use climbnet_roster::{
    EntitySpawner, JoinOutcome, LeaveOutcome, Role, RosterConfig, RosterError, RosterReplica,
    SessionRoster,
};

// =========================================================================
// Helpers
// =========================================================================

/// Tracks live entities and their owners so tests can check the
/// "exactly one entity per participant" invariant from the outside.
#[derive(Default)]
struct LedgerSpawner {
    next: u64,
    live: HashMap<EntityId, (ParticipantId, Pose)>,
}

impl EntitySpawner for LedgerSpawner {
    fn spawn(&mut self, owner: ParticipantId, pose: Pose) -> EntityId {
        self.next += 1;
        let id = EntityId(self.next);
        self.live.insert(id, (owner, pose));
        id
    }

    fn despawn(&mut self, entity: EntityId) {
        self.live.remove(&entity);
    }
}

fn pid(id: u32) -> ParticipantId {
    ParticipantId(id)
}

fn host(capacity: usize) -> SessionRoster {
    SessionRoster::new(
        Role::Authority,
        RosterConfig {
            capacity,
            ..RosterConfig::default()
        },
    )
}

/// Small deterministic generator; enough to shuffle event sequences.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }
}

fn assert_consistent(roster: &SessionRoster, spawner: &LedgerSpawner) {
    assert!(roster.len() <= roster.capacity());
    assert_eq!(roster.len(), spawner.live.len(), "one entity per entry");
    for (participant, entity) in roster.iter() {
        let (owner, _) = spawner.live.get(&entity).expect("entry points at live entity");
        assert_eq!(*owner, participant);
    }
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn test_two_participants_join_and_leave_end_to_end() {
    let mut roster = host(12);
    let mut spawner = LedgerSpawner::default();

    let a = roster.on_join(pid(1), &mut spawner).unwrap();
    assert_eq!(roster.len(), 1);
    let JoinOutcome::Spawned(a_entity) = a else {
        panic!("expected spawn, got {a:?}");
    };
    assert_eq!(spawner.live[&a_entity].1, RosterConfig::default().spawn);

    roster.on_join(pid(2), &mut spawner).unwrap();
    assert_eq!(roster.len(), 2);
    let b_entity = roster.entity_of(&pid(2)).unwrap();

    assert_eq!(roster.on_leave(pid(1), &mut spawner), LeaveOutcome::Despawned(a_entity));
    assert_eq!(roster.len(), 1);
    assert_eq!(roster.entity_of(&pid(2)), Some(b_entity), "B unaffected");

    roster.on_leave(pid(2), &mut spawner);
    assert_eq!(roster.len(), 0);
    assert!(spawner.live.is_empty());
}

#[test]
fn test_random_join_leave_sequences_respect_capacity() {
    for seed in 1..=20u64 {
        let capacity = (seed % 5 + 1) as usize;
        let mut roster = host(capacity);
        let mut spawner = LedgerSpawner::default();
        let mut rng = XorShift(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));

        for _ in 0..200 {
            let participant = pid((rng.next() % 8) as u32);
            if rng.next() % 2 == 0 {
                match roster.on_join(participant, &mut spawner) {
                    Ok(_) => {}
                    Err(RosterError::CapacityExceeded { .. }) => {
                        assert!(roster.is_full());
                        assert!(!roster.contains(&participant));
                    }
                }
            } else {
                roster.on_leave(participant, &mut spawner);
            }
            assert_consistent(&roster, &spawner);
        }
    }
}

#[test]
fn test_capacity_error_message_names_participant() {
    let mut roster = host(1);
    let mut spawner = LedgerSpawner::default();
    roster.on_join(pid(1), &mut spawner).unwrap();

    let err = roster.on_join(pid(2), &mut spawner).unwrap_err();

    assert!(err.to_string().contains("P-2"), "{err}");
}

#[test]
fn test_replica_follows_authority_deltas() {
    let mut roster = host(4);
    let mut spawner = LedgerSpawner::default();
    let mut replica = RosterReplica::new();
    replica.apply_snapshot(&roster.snapshot()).unwrap();

    roster.on_join(pid(1), &mut spawner).unwrap();
    roster.on_join(pid(2), &mut spawner).unwrap();
    roster.on_leave(pid(1), &mut spawner);
    for delta in roster.drain_deltas() {
        replica.apply_delta(&delta).unwrap();
    }

    assert_eq!(replica.len(), 1);
    assert_eq!(replica.entity_of(&pid(2)), roster.entity_of(&pid(2)));
    assert_eq!(replica.capacity(), Some(4));
}

#[test]
fn test_late_observer_catches_up_from_snapshot() {
    let mut roster = host(4);
    let mut spawner = LedgerSpawner::default();
    roster.on_join(pid(5), &mut spawner).unwrap();
    roster.on_join(pid(6), &mut spawner).unwrap();

    let mut replica = RosterReplica::new();
    replica.apply_snapshot(&roster.snapshot()).unwrap();

    assert_eq!(replica.len(), 2);
    assert_eq!(replica.entity_of(&pid(5)), roster.entity_of(&pid(5)));
}
