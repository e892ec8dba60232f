use crate::registry::ConnectionRegistry;
use crate::room::RoomDirectory;
use crate::signaling::Effect;
use crate::transport::TransportEvent;
use rendezvous_core::{ConnectionId, RoomId, ServerMessage, SignalPayload, UserId};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct RelayConfig {
    /// Tell the sender when a signal's target has no live connection.
    /// Off by default: undeliverable signals are dropped silently.
    pub notify_undeliverable: bool,
}

/// Identity bookkeeping and routing for every connection on the server.
///
/// All mutation happens inside [`Relay::handle`], one event at a time. The
/// caller is expected to hold the relay behind a single lock.
#[derive(Debug, Default)]
pub struct Relay {
    registry: ConnectionRegistry,
    directory: RoomDirectory,
    config: RelayConfig,
}

impl Relay {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            directory: RoomDirectory::new(),
            config,
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn directory(&self) -> &RoomDirectory {
        &self.directory
    }

    /// Applies one transport event and returns what must be sent as a result.
    pub fn handle(&mut self, connection: ConnectionId, event: TransportEvent) -> Vec<Effect> {
        match event {
            TransportEvent::Connected => {
                debug!("Connection {} registered", connection);
                Vec::new()
            }
            TransportEvent::JoinRoom { room_id, user_id } => {
                self.join_room(connection, room_id, user_id)
            }
            TransportEvent::Signal(payload) => self.route(connection, payload),
            TransportEvent::Disconnected => self.disconnect(connection),
        }
    }

    fn join_room(
        &mut self,
        connection: ConnectionId,
        room_id: RoomId,
        user_id: UserId,
    ) -> Vec<Effect> {
        let mut effects = Vec::new();

        // A connection switching identity leaves as its old self first, so the
        // old identity is not stranded in rooms with nobody behind it.
        let previous = self
            .registry
            .identity_of(&connection)
            .filter(|previous| **previous != user_id)
            .cloned();
        if let Some(previous) = previous {
            info!(
                "Connection {} switches identity from {} to {}",
                connection, previous, user_id
            );
            self.registry.unbind(&connection);
            effects.extend(self.evict(&previous));
        }

        if let Some(stale) = self.registry.resolve(&user_id).filter(|h| *h != connection) {
            warn!(
                "User {} rebound from connection {} to {}",
                user_id, stale, connection
            );
        }
        self.registry.bind(user_id.clone(), connection);
        self.directory.join(&room_id, &user_id);
        info!("User {} joined room {} via {}", user_id, room_id, connection);

        effects.push(self.send_existing_users(connection, &room_id, &user_id));
        effects.extend(self.announce_join(&room_id, &user_id));
        effects
    }

    fn route(&mut self, connection: ConnectionId, payload: SignalPayload) -> Vec<Effect> {
        let Some(target) = self.registry.resolve(payload.target()) else {
            warn!(
                "Dropping {} from {} in room {}: user {} is not connected",
                payload.kind(),
                payload.sender(),
                payload.room_id(),
                payload.target()
            );

            if !self.config.notify_undeliverable {
                return Vec::new();
            }
            return vec![Effect::Unicast {
                to: connection,
                message: ServerMessage::SignalUndeliverable {
                    target_user_id: payload.target().clone(),
                },
            }];
        };

        debug!(
            "Relaying {} from {} to {} in room {}",
            payload.kind(),
            payload.sender(),
            payload.target(),
            payload.room_id()
        );
        vec![Effect::Unicast {
            to: target,
            message: ServerMessage::Signal(payload),
        }]
    }

    fn disconnect(&mut self, connection: ConnectionId) -> Vec<Effect> {
        let Some(user_id) = self.registry.unbind(&connection) else {
            debug!("Connection {} closed without an identity", connection);
            return Vec::new();
        };

        info!("User {} disconnected ({})", user_id, connection);
        self.evict(&user_id)
    }

    /// Removes `user_id` from all rooms and tells whoever remains.
    fn evict(&mut self, user_id: &UserId) -> Vec<Effect> {
        self.directory
            .leave_all(user_id)
            .into_iter()
            .filter_map(|room_id| self.announce_leave(&room_id, user_id))
            .collect()
    }

    fn send_existing_users(
        &self,
        to: ConnectionId,
        room_id: &RoomId,
        excluding: &UserId,
    ) -> Effect {
        let mut users = self.directory.members_excluding(room_id, excluding);
        users.sort();

        Effect::Unicast {
            to,
            message: ServerMessage::ExistingUsers { users },
        }
    }

    /// Must be called after the joiner is recorded as a member.
    fn announce_join(&self, room_id: &RoomId, user_id: &UserId) -> Option<Effect> {
        self.broadcast(
            room_id,
            user_id,
            ServerMessage::UserJoined {
                user_id: user_id.clone(),
            },
        )
    }

    fn announce_leave(&self, room_id: &RoomId, user_id: &UserId) -> Option<Effect> {
        if !self.directory.contains_room(room_id) {
            return None;
        }

        self.broadcast(
            room_id,
            user_id,
            ServerMessage::UserLeft {
                user_id: user_id.clone(),
            },
        )
    }

    fn broadcast(
        &self,
        room_id: &RoomId,
        excluding: &UserId,
        message: ServerMessage,
    ) -> Option<Effect> {
        let to: Vec<ConnectionId> = self
            .directory
            .members_excluding(room_id, excluding)
            .iter()
            .filter_map(|member| self.registry.resolve(member))
            .collect();

        if to.is_empty() {
            return None;
        }

        Some(Effect::Broadcast {
            room_id: room_id.clone(),
            to,
            message,
        })
    }
}
