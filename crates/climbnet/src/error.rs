//! Unified error type for climbnet.

use climbnet_protocol::ProtocolError;
use climbnet_roster::RosterError;
use climbnet_session::SessionError;

/// Top-level error wrapping every crate-specific error.
///
/// Each variant has a `#[from]` impl, so `?` converts sub-crate errors.
#[derive(Debug, thiserror::Error)]
pub enum ClimbnetError {
    /// Encoding or decoding a replication message failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A join was rejected by the roster.
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// Connect or disconnect failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use climbnet_protocol::ParticipantId;

    #[test]
    fn test_from_protocol_error() {
        let err: ClimbnetError = ProtocolError::InvalidMessage("bad".into()).into();
        assert!(matches!(err, ClimbnetError::Protocol(_)));
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn test_from_roster_error() {
        let err: ClimbnetError = RosterError::CapacityExceeded {
            participant: ParticipantId(9),
            capacity: 2,
        }
        .into();
        assert!(matches!(err, ClimbnetError::Roster(_)));
    }

    #[test]
    fn test_from_session_error() {
        let err: ClimbnetError = SessionError::ReentrantConnect.into();
        assert!(matches!(err, ClimbnetError::Session(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: ClimbnetError = json_err.into();
        assert!(err.to_string().starts_with("invalid configuration"));
    }
}
