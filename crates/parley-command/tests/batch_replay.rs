//! Integration tests for the full send → wire → receive → replay path.
//!
//! One invoker plays the client: it stores commands and serializes them.
//! The batch string stands in for whatever the transport carries. A second
//! invoker, with a recording receiver bound, plays the server.

use std::sync::{Arc, Mutex};

use parley_command::{CommandInvoker, InvokerConfig, InvokerError};
use parley_protocol::{Command, ProtocolError, Receiver};

// =========================================================================
// Recording receiver
// =========================================================================

/// One observed receiver call.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Register(String, String),
    Login(String, String),
    Logout,
    Create(String),
    Join(String),
    Leave,
    SendMessage(String),
    Close,
}

/// Records every call in order. Never fails.
#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<Call>>,
}

impl Recorder {
    fn record(&self, call: Call) -> Result<(), std::convert::Infallible> {
        self.calls.lock().unwrap().push(call);
        Ok(())
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl Receiver for Recorder {
    type Error = std::convert::Infallible;

    fn register(&self, username: &str, password: &str) -> Result<(), Self::Error> {
        self.record(Call::Register(username.into(), password.into()))
    }

    fn login(&self, username: &str, password: &str) -> Result<(), Self::Error> {
        self.record(Call::Login(username.into(), password.into()))
    }

    fn logout(&self) -> Result<(), Self::Error> {
        self.record(Call::Logout)
    }

    fn create(&self, name: &str) -> Result<(), Self::Error> {
        self.record(Call::Create(name.into()))
    }

    fn join(&self, name: &str) -> Result<(), Self::Error> {
        self.record(Call::Join(name.into()))
    }

    fn leave(&self) -> Result<(), Self::Error> {
        self.record(Call::Leave)
    }

    fn send_message(&self, message: &str) -> Result<(), Self::Error> {
        self.record(Call::SendMessage(message.into()))
    }

    fn close(&self) -> Result<(), Self::Error> {
        self.record(Call::Close)
    }
}

// =========================================================================
// Helpers
// =========================================================================

/// Serializes `commands` on a client invoker, decodes and replays them on
/// a server invoker, and returns what the receiver saw.
fn replay(commands: Vec<Command>, config: InvokerConfig) -> Vec<Call> {
    let mut client = CommandInvoker::<Recorder>::with_config(config);
    for command in commands {
        client.store(command);
    }
    let batch = client.serialize();

    let recorder = Arc::new(Recorder::default());
    let mut server = CommandInvoker::with_receiver(Arc::clone(&recorder));
    server.decode(&batch).expect("batch should decode");
    server.execute_all().expect("replay should succeed");
    recorder.calls()
}

fn full_session() -> Vec<Command> {
    vec![
        Command::register("alice", "pw1"),
        Command::login("alice", "pw1"),
        Command::create("rust"),
        Command::join("rust"),
        Command::message("hello, room"),
        Command::leave(),
        Command::logout(),
        Command::close(),
    ]
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn test_register_then_message_replays_in_store_order() {
    let calls = replay(
        vec![Command::register("alice", "pw1"), Command::message("hi")],
        InvokerConfig::default(),
    );
    assert_eq!(
        calls,
        vec![
            Call::Register("alice".into(), "pw1".into()),
            Call::SendMessage("hi".into()),
        ]
    );
}

#[test]
fn test_single_logout_batch_calls_logout_once() {
    let recorder = Arc::new(Recorder::default());
    let mut server = CommandInvoker::with_receiver(Arc::clone(&recorder));

    server.decode(r#"[{"type":"Logout"}]"#).unwrap();
    server.execute_all().unwrap();

    assert_eq!(recorder.calls(), vec![Call::Logout]);
}

#[test]
fn test_unregistered_tag_rejected_without_receiver_calls() {
    let recorder = Arc::new(Recorder::default());
    let mut server = CommandInvoker::with_receiver(Arc::clone(&recorder));

    let err = server.decode(r#"[{"type":"Teleport"}]"#).unwrap_err();
    assert!(matches!(
        err,
        InvokerError::Protocol(ProtocolError::UnknownCommandType(ref tag)) if tag == "Teleport"
    ));

    // Nothing was decoded, so there is nothing to run.
    server.execute_all().unwrap();
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_full_session_preserves_order_and_arguments() {
    let calls = replay(full_session(), InvokerConfig::default());
    assert_eq!(
        calls,
        vec![
            Call::Register("alice".into(), "pw1".into()),
            Call::Login("alice".into(), "pw1".into()),
            Call::Create("rust".into()),
            Call::Join("rust".into()),
            Call::SendMessage("hello, room".into()),
            Call::Leave,
            Call::Logout,
            Call::Close,
        ]
    );
}

#[test]
fn test_nested_and_inline_batches_replay_identically() {
    let inline = replay(full_session(), InvokerConfig::default());
    let nested = replay(full_session(), InvokerConfig::nested());
    assert_eq!(inline, nested);
}

#[test]
fn test_decoded_commands_equal_stored_commands() {
    let mut client = CommandInvoker::<Recorder>::new();
    for command in full_session() {
        client.store(command);
    }

    let mut server = CommandInvoker::with_receiver(Arc::new(Recorder::default()));
    server.decode(client.serialize()).unwrap();

    let sent: Vec<_> = client.commands().cloned().collect();
    let received: Vec<_> = server.commands().cloned().collect();
    assert_eq!(sent, received);
}

#[test]
fn test_mixed_entry_formats_in_one_batch() {
    // Older peers send each entry as a JSON string; both shapes may even
    // show up side by side.
    let batch = r#"[
        "{\"type\":\"Login\",\"username\":\"bob\",\"password\":\"pw\"}",
        {"type":"Join","name":"lobby"}
    ]"#;

    let recorder = Arc::new(Recorder::default());
    let mut server = CommandInvoker::with_receiver(Arc::clone(&recorder));
    server.decode(batch).unwrap();
    server.execute_all().unwrap();

    assert_eq!(
        recorder.calls(),
        vec![
            Call::Login("bob".into(), "pw".into()),
            Call::Join("lobby".into()),
        ]
    );
}

#[test]
fn test_malformed_entry_aborts_whole_batch() {
    let recorder = Arc::new(Recorder::default());
    let mut server = CommandInvoker::with_receiver(Arc::clone(&recorder));

    let err = server
        .decode(r#"[{"type":"Logout"},{"type":"Message","message":7}]"#)
        .unwrap_err();
    assert!(matches!(
        err,
        InvokerError::Protocol(ProtocolError::MalformedPayload(_))
    ));
    assert!(server.is_empty());

    server.execute_all().unwrap();
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_decode_without_receiver_builds_nothing() {
    let mut server = CommandInvoker::<Recorder>::new();
    let err = server.decode(r#"[{"type":"Close"}]"#).unwrap_err();
    assert!(matches!(err, InvokerError::NoReceiverBound));
    assert!(server.is_empty());
}
