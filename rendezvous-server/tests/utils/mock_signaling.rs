use async_trait::async_trait;
use rendezvous_core::{ConnectionId, ServerMessage};
use rendezvous_server::SignalingOutput;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type Delivery = (ConnectionId, ServerMessage);

/// Mock SignalingOutput that captures every delivered message.
#[derive(Clone)]
pub struct MockSignalingOutput {
    /// All captured deliveries (for verification).
    sent: Arc<Mutex<Vec<Delivery>>>,
}

impl MockSignalingOutput {
    /// Create a MockSignalingOutput that stores every delivery.
    pub fn new_stored_only() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Everything delivered to `connection`, oldest first.
    pub async fn messages_for(&self, connection: &ConnectionId) -> Vec<ServerMessage> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|(to, _)| to == connection)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    pub async fn total_sent(&self) -> usize {
        self.sent.lock().await.len()
    }

    pub async fn clear(&self) {
        self.sent.lock().await.clear();
    }
}

impl Default for MockSignalingOutput {
    fn default() -> Self {
        Self::new_stored_only()
    }
}

#[async_trait]
impl SignalingOutput for MockSignalingOutput {
    async fn send(&self, connection: ConnectionId, message: ServerMessage) {
        tracing::debug!("[MockSignaling] send to {}: {:?}", connection, message);

        self.sent.lock().await.push((connection, message));
    }
}
