use rendezvous_core::{ClientMessage, RoomId, SignalPayload, UserId};

/// Events the transport feeds into the relay for a single connection.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// A new connection was accepted. It has no identity yet.
    Connected,
    JoinRoom { room_id: RoomId, user_id: UserId },
    Signal(SignalPayload),
    /// Fired by the transport once the connection is gone.
    Disconnected,
}

impl From<ClientMessage> for TransportEvent {
    fn from(msg: ClientMessage) -> Self {
        match msg {
            ClientMessage::JoinRoom { room_id, user_id } => {
                TransportEvent::JoinRoom { room_id, user_id }
            }
            ClientMessage::Signal(payload) => TransportEvent::Signal(payload),
        }
    }
}
