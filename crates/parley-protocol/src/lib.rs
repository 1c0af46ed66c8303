//! Wire protocol for Parley.
//!
//! This crate defines what a chat client can ask a server to do, and how
//! those requests look on the wire:
//!
//! - **Commands** ([`Command`], [`CommandKind`]) — the eight client
//!   actions and the receiver method each one triggers.
//! - **Records** ([`Record`], [`EntryFormat`]) — the JSON shape of one
//!   encoded command, and how it sits inside a batch.
//! - **Registry** ([`CommandRegistry`]) — wire tag → variant decoder.
//! - **Receiver** ([`Receiver`] trait) — the thing that actually performs
//!   each action.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while decoding.
//!
//! # Architecture
//!
//! The protocol layer doesn't know about sockets or about batching. It only
//! knows how to turn one command into a record and back.
//!
//! ```text
//! Transport (bytes) → Invoker (batch) → Protocol (Record ↔ Command) → Receiver
//! ```

mod codec;
mod command;
mod error;
mod receiver;
mod registry;
mod types;

pub use codec::{encode_entry, entry_to_record, record_tag};
pub use command::Command;
pub use error::ProtocolError;
pub use receiver::Receiver;
pub use registry::{CommandDescriptor, CommandRegistry, DecodeFn};
pub use types::{CommandKind, EntryFormat, Record, TYPE_FIELD};
