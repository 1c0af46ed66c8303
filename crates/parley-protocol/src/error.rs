//! Error types for the protocol layer.
//!
//! Each crate in Parley defines its own error enum. A `ProtocolError`
//! always means the problem is in how a command looks on the wire, never
//! in what the receiver did with it.

/// Errors that can occur while encoding, resolving, or decoding commands.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// An entry carried a `type` tag that no registered variant claims.
    ///
    /// This is never recovered from locally: a peer speaking a newer (or
    /// simply different) command set sent something we can't interpret.
    #[error("unknown command type: {0:?}")]
    UnknownCommandType(String),

    /// An entry's shape doesn't match its variant.
    ///
    /// Common causes: a missing field, a field holding a number instead of
    /// a string, an entry that isn't an object at all, or a batch that
    /// isn't an array.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A second descriptor tried to claim a tag that is already taken.
    ///
    /// Tags are the only discriminator on the wire, so they must be unique
    /// within a registry.
    #[error("command tag {0:?} is already registered")]
    DuplicateTag(String),

    /// The batch bytes are not valid JSON.
    ///
    /// The inner `serde_json::Error` carries the line/column of the
    /// failure, which is usually enough to spot a truncated payload.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}
