//! Unified error type for Parley.

use parley_command::InvokerError;
use parley_protocol::{CommandKind, ProtocolError};

/// Top-level error that wraps the errors of every Parley crate.
///
/// [`InvokerError`] is generic over the receiver's error type; this one
/// isn't. The receiver's error is boxed instead, so code juggling several
/// receivers can still use a single error type and `?` everywhere.
#[derive(Debug, thiserror::Error)]
pub enum ParleyError {
    /// A protocol-level error (unknown tag, malformed payload, bad JSON).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Decode or execute was attempted without a bound receiver.
    #[error("no receiver bound")]
    NoReceiverBound,

    /// The receiver rejected a command during replay.
    #[error("receiver rejected {kind} at position {index}: {source}")]
    Receiver {
        index: usize,
        kind: CommandKind,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl<E> From<InvokerError<E>> for ParleyError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: InvokerError<E>) -> Self {
        match err {
            InvokerError::NoReceiverBound => Self::NoReceiverBound,
            InvokerError::Protocol(e) => Self::Protocol(e),
            InvokerError::Receiver {
                index,
                kind,
                source,
            } => Self::Receiver {
                index,
                kind,
                source: Box::new(source),
            },
        }
    }
}
