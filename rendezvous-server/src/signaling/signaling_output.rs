use crate::signaling::Effect;
use async_trait::async_trait;
use rendezvous_core::{ConnectionId, ServerMessage};

/// Delivery side of the relay: whatever owns the live connections.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Send one message to one connection. Delivery is best effort; an
    /// implementation must not fail the caller if the connection is gone.
    async fn send(&self, connection: ConnectionId, message: ServerMessage);

    /// Carry out the effects of one relay event, in order.
    async fn deliver(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Unicast { to, message } => self.send(to, message).await,
                Effect::Broadcast { to, message, .. } => {
                    for connection in to {
                        self.send(connection, message.clone()).await;
                    }
                }
            }
        }
    }
}
