//! Command batching and replay for Parley.
//!
//! The [`CommandInvoker`] is the piece that sits on both ends of a
//! connection:
//!
//! 1. **Sending** — buffer commands with [`store`](CommandInvoker::store),
//!    then [`serialize`](CommandInvoker::serialize) the whole buffer into
//!    one JSON batch for the transport.
//! 2. **Receiving** — bind a [`Receiver`](parley_protocol::Receiver),
//!    [`decode`](CommandInvoker::decode) the batch the transport handed
//!    over, then [`execute_all`](CommandInvoker::execute_all) in order.
//!
//! # How it fits in the stack
//!
//! ```text
//! Transport (outside Parley)  ← moves the batch string between peers
//!     ↕
//! Invoker (this crate)  ← ordered buffer, batch encode/decode, replay
//!     ↕
//! Protocol (below)  ← Command, Record, CommandRegistry, Receiver
//! ```

mod config;
mod error;
mod invoker;

pub use config::InvokerConfig;
pub use error::InvokerError;
pub use invoker::CommandInvoker;
