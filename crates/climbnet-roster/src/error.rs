//! Error types for the roster layer.

use climbnet_protocol::ParticipantId;

/// Errors the roster reports to the transport.
///
/// Non-authority mutations and duplicate leaves are not errors: they are
/// reported as [`JoinOutcome::Ignored`](crate::JoinOutcome::Ignored) and
/// [`LeaveOutcome`](crate::LeaveOutcome) variants.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// The roster is full. The transport must reject this participant.
    #[error("roster full ({capacity} participants), rejecting {participant}")]
    CapacityExceeded {
        participant: ParticipantId,
        capacity: usize,
    },
}
