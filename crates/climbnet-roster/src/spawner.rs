//! The seam between the roster and whatever owns entities.

use climbnet_protocol::{EntityId, ParticipantId, Pose};

/// Creates and destroys player entities on behalf of the roster.
///
/// The roster decides *whether* a participant gets an entity; the spawner
/// decides what an entity is. In climbnet the simulation world implements
/// this, but tests can plug in anything that hands out ids.
///
/// ## Borrowing, not owning
///
/// [`SessionRoster::on_join`](crate::SessionRoster::on_join) takes
/// `&mut impl EntitySpawner` for the duration of one call. The roster
/// never stores the spawner, so the crate has no dependency on the
/// simulation crate and the host can keep the world as a plain field next
/// to the roster.
///
/// ## Contract
///
/// - `spawn` must return an id it has never returned before. Observers
///   rely on this to tell a stale replicated spawn from a fresh one.
/// - `despawn` is only called with ids this spawner handed out, at most
///   once each.
pub trait EntitySpawner {
    /// Creates an entity owned by `owner` at `pose` and returns its id.
    fn spawn(&mut self, owner: ParticipantId, pose: Pose) -> EntityId;

    /// Destroys `entity`. Destroying an unknown entity is a no-op.
    fn despawn(&mut self, entity: EntityId);
}
