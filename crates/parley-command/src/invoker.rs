//! The command invoker: an ordered buffer that can cross a process
//! boundary.
//!
//! On the sending side it collects commands and serializes them as one
//! batch. On the receiving side it turns a batch back into commands, each
//! attached to the bound receiver, and replays them in their original
//! order.
//!
//! # Ordering
//!
//! Order is the whole point: `Login` must run before `Message`, `Join`
//! before `Leave`. The buffer is a `Vec`, insertion order is
//! serialization order is execution order, and nothing here ever removes
//! or reorders an entry. The only ways to change the buffer are
//! [`store`](CommandInvoker::store) (append) and
//! [`decode`](CommandInvoker::decode) (replace everything).
//!
//! # Concurrency note
//!
//! `CommandInvoker` is a plain single-owner value with no locking. Use one
//! invoker per batch exchange; concurrent batches get their own invokers.

use std::sync::Arc;

use parley_protocol::{
    Command, CommandRegistry, ProtocolError, Receiver, encode_entry, entry_to_record,
};
use serde_json::Value;

use crate::{InvokerConfig, InvokerError};

/// A buffered command plus the receiver it will run against.
///
/// The receiver is whatever was bound when the command entered the buffer.
/// Rebinding the invoker later doesn't retarget commands already here.
struct Pending<R> {
    command: Command,
    receiver: Option<Arc<R>>,
}

/// Buffers, serializes, decodes, and replays batches of commands.
///
/// ## Lifecycle
///
/// ```text
///            store()                 serialize()
/// [Empty] ───────────→ [Buffered] ──────────────→ [Buffered]  (batch handed to transport)
///    │                     │
///    └──── decode() ───────┴──→ [Buffered, replaced] ──execute_all()──→ [Buffered, effects applied]
///        (receiver bound)
/// ```
pub struct CommandInvoker<R: Receiver> {
    /// Pending commands, in store/decode order.
    commands: Vec<Pending<R>>,

    /// The receiver attached to every command stored or decoded from now on.
    ///
    /// `Arc` because every decoded command shares it; the invoker doesn't
    /// own the receiver, it just holds a handle.
    receiver: Option<Arc<R>>,

    config: InvokerConfig,
}

impl<R: Receiver> CommandInvoker<R> {
    /// Creates an empty invoker with no receiver and default config.
    pub fn new() -> Self {
        Self::with_config(InvokerConfig::default())
    }

    /// Creates an empty invoker with no receiver and the given config.
    pub fn with_config(config: InvokerConfig) -> Self {
        Self {
            commands: Vec::new(),
            receiver: None,
            config,
        }
    }

    /// Creates an empty invoker that already has `receiver` bound.
    pub fn with_receiver(receiver: Arc<R>) -> Self {
        let mut invoker = Self::new();
        invoker.set_receiver(receiver);
        invoker
    }

    /// Appends a command to the end of the buffer.
    ///
    /// The command is paired with the currently bound receiver, if any.
    /// No validation happens here: any `Command` is a valid command.
    pub fn store(&mut self, command: Command) {
        tracing::trace!(tag = command.tag(), position = self.commands.len(), "command stored");
        self.commands.push(Pending {
            command,
            receiver: self.receiver.clone(),
        });
    }

    /// Encodes the whole buffer as one JSON batch.
    ///
    /// The result is an array with one element per buffered command, in
    /// buffer order; each element is laid out according to
    /// [`InvokerConfig::entry_format`]. The buffer is left as it was, so
    /// calling this twice gives the same string.
    pub fn serialize(&self) -> String {
        let entries: Vec<Value> = self
            .commands
            .iter()
            .map(|pending| encode_entry(&pending.command, self.config.entry_format))
            .collect();

        tracing::debug!(
            count = entries.len(),
            format = ?self.config.entry_format,
            "command batch serialized"
        );

        // `Value`'s Display impl writes compact JSON and can't fail.
        Value::Array(entries).to_string()
    }

    /// Binds the receiver for commands stored or decoded from now on.
    ///
    /// Rebinding is allowed. Commands already in the buffer keep the
    /// receiver they were given.
    pub fn set_receiver(&mut self, receiver: Arc<R>) {
        self.receiver = Some(receiver);
    }

    /// The currently bound receiver, if any.
    pub fn receiver(&self) -> Option<&Arc<R>> {
        self.receiver.as_ref()
    }

    /// Decodes a batch with the global [`CommandRegistry`] and replaces the
    /// buffer with the result.
    ///
    /// **Destructive:** anything stored but not yet serialized is
    /// discarded on success. On failure the buffer is left untouched.
    ///
    /// Returns the number of decoded commands.
    ///
    /// # Errors
    /// - [`InvokerError::NoReceiverBound`] — call
    ///   [`set_receiver`](Self::set_receiver) first
    /// - [`InvokerError::Protocol`] — the batch isn't JSON, isn't an array,
    ///   holds an unknown tag, or an entry doesn't fit its variant. Decoding
    ///   stops at the first bad entry.
    pub fn decode(&mut self, blob: impl AsRef<[u8]>) -> Result<usize, InvokerError<R::Error>> {
        self.decode_with(blob, CommandRegistry::global())
    }

    /// Like [`decode`](Self::decode), but resolves tags with `registry`.
    ///
    /// Handy for peers that should only accept part of the command set.
    pub fn decode_with(
        &mut self,
        blob: impl AsRef<[u8]>,
        registry: &CommandRegistry,
    ) -> Result<usize, InvokerError<R::Error>> {
        // Checked before parsing: without a receiver we must not build
        // anything at all.
        let receiver = self
            .receiver
            .clone()
            .ok_or(InvokerError::NoReceiverBound)?;

        let batch: Value =
            serde_json::from_slice(blob.as_ref()).map_err(ProtocolError::Decode)?;
        let Value::Array(entries) = batch else {
            return Err(ProtocolError::MalformedPayload(
                "batch must be a JSON array".to_string(),
            )
            .into());
        };

        // Build into a fresh list so a failure halfway leaves the current
        // buffer alone.
        let mut decoded = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let command = entry_to_record(entry)
                .and_then(|record| registry.decode_record(&record))
                .inspect_err(|e| {
                    tracing::warn!(index, error = %e, "rejected batch entry");
                })?;

            tracing::debug!(index, tag = command.tag(), "command decoded");
            decoded.push(Pending {
                command,
                receiver: Some(Arc::clone(&receiver)),
            });
        }

        let count = decoded.len();
        let discarded = std::mem::replace(&mut self.commands, decoded).len();
        tracing::info!(count, discarded, "command batch decoded");
        Ok(count)
    }

    /// Executes every buffered command, in order, against its receiver.
    ///
    /// Stops at the first failure; commands before it have already taken
    /// effect and nothing is rolled back. The buffer is not cleared, so
    /// calling this twice replays the batch twice.
    ///
    /// # Errors
    /// - [`InvokerError::Receiver`] — the receiver rejected a command
    /// - [`InvokerError::NoReceiverBound`] — a command was stored before
    ///   any receiver was bound, so it has nothing to run against
    pub fn execute_all(&self) -> Result<(), InvokerError<R::Error>> {
        for (index, pending) in self.commands.iter().enumerate() {
            let receiver = pending
                .receiver
                .as_deref()
                .ok_or(InvokerError::NoReceiverBound)?;

            let kind = pending.command.kind();
            pending.command.execute(receiver).map_err(|source| {
                tracing::warn!(index, %kind, error = %source, "receiver rejected command");
                InvokerError::Receiver {
                    index,
                    kind,
                    source,
                }
            })?;
            tracing::trace!(index, %kind, "command executed");
        }

        tracing::debug!(count = self.commands.len(), "command batch executed");
        Ok(())
    }

    /// The buffered commands, in order.
    pub fn commands(&self) -> impl ExactSizeIterator<Item = &Command> {
        self.commands.iter().map(|pending| &pending.command)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }
}

impl<R: Receiver> Default for CommandInvoker<R> {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
