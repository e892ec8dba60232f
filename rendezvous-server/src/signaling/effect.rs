use rendezvous_core::{ConnectionId, RoomId, ServerMessage};
use std::slice;

/// Outbound instruction produced by the relay for one inbound event.
///
/// Recipients are resolved when the effect is produced, so executing an
/// effect never reads relay state.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Unicast {
        to: ConnectionId,
        message: ServerMessage,
    },
    Broadcast {
        room_id: RoomId,
        to: Vec<ConnectionId>,
        message: ServerMessage,
    },
}

impl Effect {
    pub fn recipients(&self) -> &[ConnectionId] {
        match self {
            Effect::Unicast { to, .. } => slice::from_ref(to),
            Effect::Broadcast { to, .. } => to,
        }
    }
}
