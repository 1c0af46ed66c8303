//! # Parley
//!
//! Serializable command layer for chat clients and servers.
//!
//! A client turns user actions (register, log in, join a room, say
//! something) into [`Command`](prelude::Command)s, buffers them in a
//! [`CommandInvoker`](prelude::CommandInvoker), and ships the serialized
//! batch over whatever transport it likes. The server decodes the batch
//! with its own [`Receiver`](prelude::Receiver) bound and replays every
//! command, in order.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use parley::prelude::*;
//!
//! // Client side
//! let mut outbound = CommandInvoker::<MyHandler>::new();
//! outbound.store(Command::login("alice", "pw1"));
//! outbound.store(Command::message("hi"));
//! let batch = outbound.serialize();
//!
//! // Server side
//! let mut inbound = CommandInvoker::with_receiver(Arc::new(MyHandler::default()));
//! inbound.decode(&batch)?;
//! inbound.execute_all()?;
//! ```

mod error;
mod telemetry;

pub use error::ParleyError;
pub use telemetry::init_tracing;

/// Everything needed to build, ship, and replay command batches.
pub mod prelude {
    pub use parley_command::{CommandInvoker, InvokerConfig, InvokerError};
    pub use parley_protocol::{
        Command, CommandDescriptor, CommandKind, CommandRegistry, EntryFormat,
        ProtocolError, Receiver, Record,
    };

    pub use crate::ParleyError;
}
