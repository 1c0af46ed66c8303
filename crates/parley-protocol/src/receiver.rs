//! The receiver hook: whatever actually performs a command's effect.
//!
//! Parley doesn't know how to register a user, check a password, or keep
//! track of room membership. That's the chat server's job. Instead, Parley
//! defines the [`Receiver`] trait: one method per command variant. Each
//! decoded command calls exactly one of them.
//!
//! # Why a trait?
//!
//! The same command batch can be replayed against very different targets:
//! - the real client handler on a chat server
//! - a logging receiver in a demo
//! - a recording mock in tests
//!
//! None of them need any change in the command or invoker code.

/// Performs the side effect of each command variant.
///
/// Methods take `&self`: a receiver is shared between every command in a
/// batch (through an `Arc`), so implementations that keep state use
/// interior mutability (`Mutex`, `RefCell`, atomics).
///
/// The outcome of each call is opaque to Parley. A returned error is
/// propagated to whoever asked for execution and stops the batch there.
///
/// # Example
///
/// ```rust
/// use std::sync::Mutex;
/// use parley_protocol::Receiver;
///
/// /// Remembers who logged in last. Everything else is a no-op.
/// #[derive(Default)]
/// struct LastLogin(Mutex<Option<String>>);
///
/// impl Receiver for LastLogin {
///     type Error = std::convert::Infallible;
///
///     fn register(&self, _: &str, _: &str) -> Result<(), Self::Error> { Ok(()) }
///     fn login(&self, username: &str, _: &str) -> Result<(), Self::Error> {
///         *self.0.lock().unwrap() = Some(username.to_string());
///         Ok(())
///     }
///     fn logout(&self) -> Result<(), Self::Error> { Ok(()) }
///     fn create(&self, _: &str) -> Result<(), Self::Error> { Ok(()) }
///     fn join(&self, _: &str) -> Result<(), Self::Error> { Ok(()) }
///     fn leave(&self) -> Result<(), Self::Error> { Ok(()) }
///     fn send_message(&self, _: &str) -> Result<(), Self::Error> { Ok(()) }
///     fn close(&self) -> Result<(), Self::Error> { Ok(()) }
/// }
/// ```
pub trait Receiver: Send + Sync + 'static {
    /// What the receiver reports when it rejects a command
    /// (bad credentials, unknown room, ...).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Creates a new account.
    fn register(&self, username: &str, password: &str) -> Result<(), Self::Error>;

    /// Authenticates an existing account.
    fn login(&self, username: &str, password: &str) -> Result<(), Self::Error>;

    /// Ends the authenticated session.
    fn logout(&self) -> Result<(), Self::Error>;

    /// Creates a room with the given name.
    fn create(&self, name: &str) -> Result<(), Self::Error>;

    /// Joins the named room.
    fn join(&self, name: &str) -> Result<(), Self::Error>;

    /// Leaves the current room.
    fn leave(&self) -> Result<(), Self::Error>;

    /// Posts a message to the current room.
    fn send_message(&self, message: &str) -> Result<(), Self::Error>;

    /// Closes the connection.
    fn close(&self) -> Result<(), Self::Error>;
}
