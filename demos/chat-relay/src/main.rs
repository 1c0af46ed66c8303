use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use parley::prelude::*;
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Server-side receiver
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
enum LobbyError {
    #[error("user {0} already exists")]
    UserExists(String),
    #[error("bad credentials for {0}")]
    BadCredentials(String),
    #[error("not logged in")]
    NotLoggedIn,
    #[error("no room named {0}")]
    NoSuchRoom(String),
}

#[derive(Default)]
struct Lobby {
    accounts: Vec<(String, String)>,
    rooms: HashSet<String>,
    user: Option<String>,
    room: Option<String>,
}

/// A toy chat backend: just enough state to show order mattering.
#[derive(Default)]
struct LobbyHandler(Mutex<Lobby>);

impl LobbyHandler {
    fn with<T>(&self, f: impl FnOnce(&mut Lobby) -> Result<T, LobbyError>) -> Result<T, LobbyError> {
        // A poisoned lock only means an earlier call panicked mid-update;
        // the demo keeps going with whatever state is there.
        let mut lobby = self.0.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut lobby)
    }
}

fn current_user(lobby: &Lobby) -> Result<String, LobbyError> {
    lobby.user.clone().ok_or(LobbyError::NotLoggedIn)
}

impl Receiver for LobbyHandler {
    type Error = LobbyError;

    fn register(&self, username: &str, password: &str) -> Result<(), LobbyError> {
        self.with(|lobby| {
            if lobby.accounts.iter().any(|(u, _)| u == username) {
                return Err(LobbyError::UserExists(username.into()));
            }
            lobby.accounts.push((username.into(), password.into()));
            tracing::info!(%username, "registered");
            Ok(())
        })
    }

    fn login(&self, username: &str, password: &str) -> Result<(), LobbyError> {
        self.with(|lobby| {
            let known = lobby
                .accounts
                .iter()
                .any(|(u, p)| u == username && p == password);
            if !known {
                return Err(LobbyError::BadCredentials(username.into()));
            }
            lobby.user = Some(username.into());
            tracing::info!(%username, "logged in");
            Ok(())
        })
    }

    fn logout(&self) -> Result<(), LobbyError> {
        self.with(|lobby| {
            let user = current_user(lobby)?;
            lobby.user = None;
            lobby.room = None;
            tracing::info!(username = %user, "logged out");
            Ok(())
        })
    }

    fn create(&self, name: &str) -> Result<(), LobbyError> {
        self.with(|lobby| {
            current_user(lobby)?;
            lobby.rooms.insert(name.into());
            tracing::info!(room = %name, "room created");
            Ok(())
        })
    }

    fn join(&self, name: &str) -> Result<(), LobbyError> {
        self.with(|lobby| {
            let user = current_user(lobby)?;
            if !lobby.rooms.contains(name) {
                return Err(LobbyError::NoSuchRoom(name.into()));
            }
            lobby.room = Some(name.into());
            tracing::info!(username = %user, room = %name, "joined");
            Ok(())
        })
    }

    fn leave(&self) -> Result<(), LobbyError> {
        self.with(|lobby| {
            let user = current_user(lobby)?;
            if let Some(room) = lobby.room.take() {
                tracing::info!(username = %user, %room, "left");
            }
            Ok(())
        })
    }

    fn send_message(&self, message: &str) -> Result<(), LobbyError> {
        self.with(|lobby| {
            let user = current_user(lobby)?;
            let room = lobby.room.as_deref().unwrap_or("<nowhere>");
            tracing::info!(username = %user, %room, %message, "message");
            Ok(())
        })
    }

    fn close(&self) -> Result<(), LobbyError> {
        tracing::info!("connection closed by client");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Main: one client task, one server task, a channel as the "wire"
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), ParleyError> {
    if let Err(e) = parley::init_tracing("info") {
        eprintln!("tracing already initialized: {e}");
    }

    let (wire_tx, mut wire_rx) = mpsc::channel::<String>(8);

    let client = tokio::spawn(async move {
        let batches = [
            vec![
                Command::register("alice", "pw1"),
                Command::login("alice", "pw1"),
                Command::create("rust"),
                Command::join("rust"),
                Command::message("hello from alice"),
            ],
            vec![Command::join("nowhere"), Command::message("never delivered")],
            vec![Command::leave(), Command::logout(), Command::close()],
        ];

        for commands in batches {
            let mut outbound = CommandInvoker::<LobbyHandler>::new();
            for command in commands {
                outbound.store(command);
            }
            if wire_tx.send(outbound.serialize()).await.is_err() {
                tracing::warn!("server hung up");
                break;
            }
        }
    });

    let handler = Arc::new(LobbyHandler::default());
    while let Some(batch) = wire_rx.recv().await {
        let mut inbound = CommandInvoker::with_receiver(Arc::clone(&handler));
        inbound.decode(&batch)?;
        if let Err(e) = inbound.execute_all() {
            // Receiver rejections end the batch, not the connection.
            tracing::warn!(error = %e, "batch aborted");
        }
    }

    if let Err(e) = client.await {
        tracing::error!(error = %e, "client task failed");
    }
    Ok(())
}
