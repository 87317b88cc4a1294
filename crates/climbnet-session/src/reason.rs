//! Shutdown and connect-failure reasons, and the mapping between them.
//!
//! The transport speaks [`ShutdownReason`]; the menu layer speaks
//! [`ConnectFailReason`]. Both directions collapse onto the same four
//! outcomes: ok, canceled, disconnected by remote policy, error.

use serde::{Deserialize, Serialize};

/// Why the transport ended (or never started) a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShutdownReason {
    Ok,
    OperationCanceled,
    /// The remote side's policy (server plugin, host logic) closed us.
    DisconnectedByPluginLogic,
    Error,
    GameNotFound,
    GameIsFull,
    ConnectionTimeout,
    ConnectionRefused,
}

/// Why a connect failed or a disconnect was requested, from the caller's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectFailReason {
    /// No specific reason.
    None,
    /// The user asked for it (cancel, back button).
    UserRequest,
    ApplicationQuit,
    /// The session was lost or closed remotely.
    Disconnect,
}

impl From<ShutdownReason> for ConnectFailReason {
    fn from(reason: ShutdownReason) -> Self {
        match reason {
            ShutdownReason::Ok | ShutdownReason::OperationCanceled => Self::UserRequest,
            ShutdownReason::DisconnectedByPluginLogic | ShutdownReason::Error => Self::Disconnect,
            _ => Self::None,
        }
    }
}

impl From<ConnectFailReason> for ShutdownReason {
    fn from(reason: ConnectFailReason) -> Self {
        match reason {
            ConnectFailReason::UserRequest | ConnectFailReason::ApplicationQuit => Self::Ok,
            ConnectFailReason::Disconnect => Self::DisconnectedByPluginLogic,
            ConnectFailReason::None => Self::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_to_fail_reason() {
        use ConnectFailReason as F;
        use ShutdownReason as S;

        assert_eq!(F::from(S::Ok), F::UserRequest);
        assert_eq!(F::from(S::OperationCanceled), F::UserRequest);
        assert_eq!(F::from(S::DisconnectedByPluginLogic), F::Disconnect);
        assert_eq!(F::from(S::Error), F::Disconnect);
        assert_eq!(F::from(S::GameIsFull), F::None);
        assert_eq!(F::from(S::ConnectionTimeout), F::None);
    }

    #[test]
    fn test_fail_reason_to_shutdown() {
        use ConnectFailReason as F;
        use ShutdownReason as S;

        assert_eq!(S::from(F::UserRequest), S::Ok);
        assert_eq!(S::from(F::ApplicationQuit), S::Ok);
        assert_eq!(S::from(F::Disconnect), S::DisconnectedByPluginLogic);
        assert_eq!(S::from(F::None), S::Error);
    }

    #[test]
    fn test_disconnect_survives_round_trip() {
        let back = ConnectFailReason::from(ShutdownReason::from(ConnectFailReason::Disconnect));
        assert_eq!(back, ConnectFailReason::Disconnect);
    }
}
