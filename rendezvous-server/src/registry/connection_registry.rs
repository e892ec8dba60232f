use rendezvous_core::{ConnectionId, UserId};
use std::collections::HashMap;

/// Two-way binding between live connections and the identities they
/// claimed at join time.
///
/// Invariant: `by_user[u] == h` if and only if `by_connection[h] == u`.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    by_user: HashMap<UserId, ConnectionId>,
    by_connection: HashMap<ConnectionId, UserId>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `user_id` to `connection`. Last bind wins: any earlier binding of
    /// either side is dropped so the two maps keep agreeing.
    ///
    /// Returns the identity `connection` was bound to before, if it differs.
    pub fn bind(&mut self, user_id: UserId, connection: ConnectionId) -> Option<UserId> {
        if let Some(previous) = self.by_user.insert(user_id.clone(), connection) {
            if previous != connection {
                self.by_connection.remove(&previous);
            }
        }

        match self.by_connection.insert(connection, user_id.clone()) {
            Some(previous) if previous != user_id => {
                self.by_user.remove(&previous);
                Some(previous)
            }
            _ => None,
        }
    }

    pub fn resolve(&self, user_id: &UserId) -> Option<ConnectionId> {
        self.by_user.get(user_id).copied()
    }

    pub fn identity_of(&self, connection: &ConnectionId) -> Option<&UserId> {
        self.by_connection.get(connection)
    }

    /// Removes the binding held by `connection`. A connection that never
    /// joined, or whose identity was since claimed by another connection,
    /// unbinds nothing.
    pub fn unbind(&mut self, connection: &ConnectionId) -> Option<UserId> {
        let user_id = self.by_connection.remove(connection)?;

        if self.by_user.get(&user_id) == Some(connection) {
            self.by_user.remove(&user_id);
        }

        Some(user_id)
    }

    pub fn len(&self) -> usize {
        self.by_user.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_user.is_empty()
    }
}
