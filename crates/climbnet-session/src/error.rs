//! Error types for the session layer.

/// Errors returned by [`ConnectionLifecycle`](crate::ConnectionLifecycle).
///
/// A cancelled connect is not an error: it comes back as a failed
/// [`ConnectResult`](crate::ConnectResult) with
/// [`ConnectFailReason::UserRequest`](crate::ConnectFailReason::UserRequest).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Another connect is still in flight. Nothing was changed.
    #[error("a connect attempt is already in progress")]
    ReentrantConnect,

    /// Disconnect was requested with no session running or connecting.
    #[error("no session to disconnect from")]
    NotConnected,

    /// The transport or scene host reported a failure.
    #[error("transport error: {0}")]
    Transport(String),
}
