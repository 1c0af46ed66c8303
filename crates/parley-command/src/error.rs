//! Error types for the invoker layer.

use parley_protocol::{CommandKind, ProtocolError};

/// Errors that can occur while decoding or executing a batch.
///
/// Generic over `E`, the receiver's own error type, so a receiver's
/// rejection reaches the caller unchanged instead of being flattened into
/// a string.
#[derive(Debug, thiserror::Error)]
pub enum InvokerError<E: std::error::Error + 'static> {
    /// A batch was decoded (or a command executed) before any receiver was
    /// bound with [`CommandInvoker::set_receiver`](crate::CommandInvoker::set_receiver).
    ///
    /// This is a programming error on the caller's side, not something a
    /// peer can trigger.
    #[error("no receiver bound; call set_receiver first")]
    NoReceiverBound,

    /// The batch itself was bad: unknown tag, wrong shape, invalid JSON.
    ///
    /// `#[from]` lets `?` turn a `ProtocolError` into this variant.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The receiver refused a command. Execution stopped at `index`; the
    /// commands before it already ran.
    #[error("receiver rejected {kind} at position {index}: {source}")]
    Receiver {
        index: usize,
        kind: CommandKind,
        #[source]
        source: E,
    },
}
