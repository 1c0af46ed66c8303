//! The command variants themselves.
//!
//! A [`Command`] is one client action (log in, join a room, say something)
//! captured as a value. It knows its own tag, how to turn itself into a
//! [`Record`](crate::Record) (see `codec.rs`), and which [`Receiver`]
//! method to call when it is executed.

use crate::{CommandKind, Receiver};

/// A single chat action, ready to be sent or executed.
///
/// This is a closed sum type: adding a variant means touching the
/// exhaustive `match`es in `kind`, `encode`, `decode` and `execute`, and the
/// compiler points at every one of them.
///
/// Commands are plain values. They don't hold on to a receiver; whoever
/// executes them passes one in (the invoker keeps the receiver that was
/// bound when each command was stored or decoded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an account.
    Register { username: String, password: String },

    /// Authenticate as an existing account.
    Login { username: String, password: String },

    /// Drop the current authentication.
    Logout,

    /// Open a new room.
    Create { name: String },

    /// Enter an existing room.
    Join { name: String },

    /// Leave whatever room we're in.
    Leave,

    /// Say something in the current room.
    Message { message: String },

    /// Hang up.
    Close,
}

impl Command {
    pub fn register(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Register {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn login(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Login {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn logout() -> Self {
        Self::Logout
    }

    pub fn create(name: impl Into<String>) -> Self {
        Self::Create { name: name.into() }
    }

    pub fn join(name: impl Into<String>) -> Self {
        Self::Join { name: name.into() }
    }

    pub fn leave() -> Self {
        Self::Leave
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    pub fn close() -> Self {
        Self::Close
    }

    /// Which variant this is, without the payload.
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Register { .. } => CommandKind::Register,
            Self::Login { .. } => CommandKind::Login,
            Self::Logout => CommandKind::Logout,
            Self::Create { .. } => CommandKind::Create,
            Self::Join { .. } => CommandKind::Join,
            Self::Leave => CommandKind::Leave,
            Self::Message { .. } => CommandKind::Message,
            Self::Close => CommandKind::Close,
        }
    }

    /// The wire tag, e.g. `"Join"`.
    pub fn tag(&self) -> &'static str {
        self.kind().tag()
    }

    /// Calls the one receiver method that matches this variant.
    ///
    /// Whatever the receiver returns is handed back untouched. Parley
    /// doesn't retry and doesn't roll anything back.
    ///
    /// `R: ?Sized` lets this work with `&dyn Receiver<Error = E>` as well
    /// as concrete receivers.
    pub fn execute<R>(&self, receiver: &R) -> Result<(), R::Error>
    where
        R: Receiver + ?Sized,
    {
        match self {
            Self::Register { username, password } => receiver.register(username, password),
            Self::Login { username, password } => receiver.login(username, password),
            Self::Logout => receiver.logout(),
            Self::Create { name } => receiver.create(name),
            Self::Join { name } => receiver.join(name),
            Self::Leave => receiver.leave(),
            Self::Message { message } => receiver.send_message(message),
            Self::Close => receiver.close(),
        }
    }
}
