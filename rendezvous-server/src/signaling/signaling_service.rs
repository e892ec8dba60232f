use crate::error::ClientRequestError;
use crate::signaling::{Relay, RelayConfig, SignalingOutput};
use crate::transport::TransportEvent;
use async_trait::async_trait;
use axum::extract::ws::{CloseFrame, Message, Utf8Bytes, close_code};
use dashmap::DashMap;
use rendezvous_core::{ConnectionId, ServerMessage};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{error, info, warn};

struct SignalingInner {
    connections: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
    relay: Mutex<Relay>,
}

/// Shared handle used by every WebSocket task.
///
/// The relay sits behind one lock and its effects are delivered before the
/// lock is released, so each event looks atomic to every other connection.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                connections: DashMap::new(),
                relay: Mutex::new(Relay::new(config)),
            }),
        }
    }

    pub fn add_connection(&self, connection: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.connections.insert(connection, tx);
    }

    pub fn remove_connection(&self, connection: &ConnectionId) {
        self.inner.connections.remove(connection);
    }

    pub fn connection_count(&self) -> usize {
        self.inner.connections.len()
    }

    pub async fn dispatch(&self, connection: ConnectionId, event: TransportEvent) {
        let mut relay = self.inner.relay.lock().await;
        let effects = relay.handle(connection, event);
        self.deliver(effects).await;
    }

    /// Read-only access to relay state.
    pub async fn inspect<R>(&self, f: impl FnOnce(&Relay) -> R) -> R {
        let relay = self.inner.relay.lock().await;
        f(&relay)
    }

    /// Answers a frame that could not be decoded. Only the sender hears about it.
    pub fn reject(&self, connection: ConnectionId, err: &ClientRequestError) {
        let msg = ServerMessage::Error {
            message: err.to_string(),
        };
        self.send_message(connection, &msg);
    }

    /// Sends a close frame to every live connection.
    pub fn close_all(&self) {
        info!(
            "Closing {} signaling connection(s)",
            self.inner.connections.len()
        );

        for entry in self.inner.connections.iter() {
            let frame = CloseFrame {
                code: close_code::AWAY,
                reason: Utf8Bytes::from_static("server shutting down"),
            };
            let _ = entry.value().send(Message::Close(Some(frame)));
        }
    }

    fn send_message(&self, connection: ConnectionId, msg: &ServerMessage) {
        let Some(tx) = self.inner.connections.get(&connection) else {
            warn!("Attempted to send to closed connection {}", connection);
            return;
        };

        match serde_json::to_string(msg) {
            Ok(json) => {
                if let Err(e) = tx.send(Message::Text(json.into())) {
                    error!("Failed to send WS message to {}: {:?}", connection, e);
                }
            }
            Err(e) => error!("Failed to serialize server message: {}", e),
        }
    }
}

impl Default for SignalingService {
    fn default() -> Self {
        Self::new(RelayConfig::default())
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send(&self, connection: ConnectionId, message: ServerMessage) {
        self.send_message(connection, &message);
    }
}
