//! The command registry: wire tag → how to build that variant.
//!
//! Decoding a batch is a two-step dance for every entry:
//!
//! ```text
//! { "type": "Join", "name": "lobby" }
//!        │
//!        ▼  registry.resolve("Join")
//! CommandDescriptor { kind: Join, decode }
//!        │
//!        ▼  (descriptor.decode)(record)
//! Command::Join { name: "lobby" }
//! ```
//!
//! The built-in table is an explicit list, one descriptor per
//! [`CommandKind`], so the set of valid tags is visible right here rather
//! than discovered at runtime.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::codec::record_tag;
use crate::{Command, CommandKind, ProtocolError, Record};

/// Turns a record's fields into a command of one specific variant.
pub type DecodeFn = fn(&Record) -> Result<Command, ProtocolError>;

/// Everything the registry knows about one variant.
#[derive(Debug, Clone, Copy)]
pub struct CommandDescriptor {
    kind: CommandKind,
    decode: DecodeFn,
}

impl CommandDescriptor {
    pub const fn new(kind: CommandKind, decode: DecodeFn) -> Self {
        Self { kind, decode }
    }

    /// The built-in descriptor for `kind`, decoding with [`Command::decode`].
    pub fn builtin(kind: CommandKind) -> Self {
        // `fn` pointers can't capture `kind`, so each arm gets its own
        // non-capturing closure.
        let decode: DecodeFn = match kind {
            CommandKind::Register => |r: &Record| Command::decode(CommandKind::Register, r),
            CommandKind::Login => |r: &Record| Command::decode(CommandKind::Login, r),
            CommandKind::Logout => |r: &Record| Command::decode(CommandKind::Logout, r),
            CommandKind::Create => |r: &Record| Command::decode(CommandKind::Create, r),
            CommandKind::Join => |r: &Record| Command::decode(CommandKind::Join, r),
            CommandKind::Leave => |r: &Record| Command::decode(CommandKind::Leave, r),
            CommandKind::Message => |r: &Record| Command::decode(CommandKind::Message, r),
            CommandKind::Close => |r: &Record| Command::decode(CommandKind::Close, r),
        };
        Self::new(kind, decode)
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    /// Builds a fresh command of this variant from `record`.
    pub fn decode(&self, record: &Record) -> Result<Command, ProtocolError> {
        (self.decode)(record)
    }
}

// ---------------------------------------------------------------------------
// CommandRegistry
// ---------------------------------------------------------------------------

/// The process-wide table, built the first time anyone asks for it.
///
/// `LazyLock` runs the initializer exactly once even if several threads
/// race to the first access; everyone else blocks until it's done. After
/// that the table is read-only.
static GLOBAL: LazyLock<CommandRegistry> = LazyLock::new(|| {
    let registry = CommandRegistry::builtin();
    tracing::debug!(tags = ?registry.tags(), "command registry initialized");
    registry
});

/// Maps wire tags to command descriptors.
///
/// Most code only ever needs [`CommandRegistry::global`]. Building your
/// own with [`new`](Self::new) + [`register`](Self::register) is useful
/// for a peer that should accept only a subset of commands (e.g. a
/// pre-login gate that knows nothing but `Register`, `Login` and `Close`).
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    by_tag: HashMap<&'static str, CommandDescriptor>,
}

impl CommandRegistry {
    /// Creates an empty registry. Every tag is unknown until registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in variant.
    pub fn builtin() -> Self {
        // Tags come from `CommandKind`, which can't produce duplicates, so
        // this goes straight into the map rather than through `register`.
        let by_tag = CommandKind::ALL
            .into_iter()
            .map(|kind| (kind.tag(), CommandDescriptor::builtin(kind)))
            .collect();
        Self { by_tag }
    }

    /// The shared, lazily built registry of every built-in variant.
    pub fn global() -> &'static CommandRegistry {
        &GLOBAL
    }

    /// Adds a descriptor.
    ///
    /// # Errors
    /// Returns [`ProtocolError::DuplicateTag`] if its tag is already taken.
    pub fn register(
        &mut self,
        descriptor: CommandDescriptor,
    ) -> Result<(), ProtocolError> {
        let tag = descriptor.tag();
        if self.by_tag.contains_key(tag) {
            return Err(ProtocolError::DuplicateTag(tag.to_string()));
        }
        self.by_tag.insert(tag, descriptor);
        Ok(())
    }

    /// Looks up the descriptor for `tag`.
    ///
    /// # Errors
    /// Returns [`ProtocolError::UnknownCommandType`] if nothing claimed it.
    pub fn resolve(&self, tag: &str) -> Result<&CommandDescriptor, ProtocolError> {
        self.by_tag
            .get(tag)
            .ok_or_else(|| ProtocolError::UnknownCommandType(tag.to_string()))
    }

    /// Decodes a full record: reads `type`, resolves it, decodes the fields.
    ///
    /// # Errors
    /// - [`ProtocolError::MalformedPayload`] — no usable `type`, or fields
    ///   don't fit the variant
    /// - [`ProtocolError::UnknownCommandType`] — `type` isn't registered
    pub fn decode_record(&self, record: &Record) -> Result<Command, ProtocolError> {
        let tag = record_tag(record)?;
        self.resolve(tag)?.decode(record)
    }

    /// Returns `true` if `tag` is registered.
    pub fn contains(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// All registered tags, sorted.
    pub fn tags(&self) -> Vec<&'static str> {
        let mut tags: Vec<_> = self.by_tag.keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}
