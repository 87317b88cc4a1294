//! Codec trait and implementations.
//!
//! A codec (coder/decoder) converts between Rust values and raw bytes. The
//! wire format itself belongs to the external transport; climbnet only
//! needs a way to turn its replication messages into bytes and back, so
//! the host and observer are generic over the [`Codec`] trait instead of
//! calling `serde_json` directly.
//!
//! [`JsonCodec`] is the default and the only implementation shipped here.
//! A binary codec plugs in by implementing the same two methods; nothing
//! else in the workspace changes.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes Rust values to bytes and decodes them back.
///
/// ## Trait bounds explained
///
/// - `Send + Sync` → a codec can be shared between threads. The connection
///   lifecycle runs on a tokio runtime, which may move work between worker
///   threads.
/// - `'static` → the codec owns everything it needs and borrows nothing,
///   so it can live inside a long-running host or observer.
///
/// ## Generic methods
///
/// `encode` and `decode` are generic over the value type, not the trait.
/// One codec instance handles every message type as long as it implements
/// the matching serde trait:
/// - `encode<T: Serialize>` → `T` can be turned into bytes
/// - `decode<T: DeserializeOwned>` → `T` can be built from bytes
///
/// `DeserializeOwned` (rather than `Deserialize<'de>`) means the decoded
/// value owns its data and does not borrow from `data`, so the receive
/// buffer can be reused right after decoding.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if the value can't be represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` on malformed or mismatched bytes.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

/// A [`Codec`] backed by `serde_json`. Behind the `json` feature (default).
///
/// ```rust
/// use climbnet_protocol::{Codec, JsonCodec, ReplicationMessage, RosterSnapshot};
///
/// let codec = JsonCodec;
/// let msg = ReplicationMessage::Roster(RosterSnapshot::default());
/// let bytes = codec.encode(&msg).unwrap();
/// let back: ReplicationMessage = codec.decode(&bytes).unwrap();
/// assert_eq!(msg, back);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
