use rendezvous_core::{RoomId, UserId};
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Room membership by identity. Rooms exist only while they have members.
#[derive(Debug, Default)]
pub struct RoomDirectory {
    rooms: HashMap<RoomId, HashSet<UserId>>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `user_id` to `room_id`, creating the room on first join.
    /// Joining twice is the same as joining once.
    pub fn join(&mut self, room_id: &RoomId, user_id: &UserId) {
        let members = self.rooms.entry(room_id.clone()).or_insert_with(|| {
            info!("Creating new room: {}", room_id);
            HashSet::new()
        });
        members.insert(user_id.clone());
    }

    /// Current members of `room_id` other than `user_id`, in no particular order.
    pub fn members_excluding(&self, room_id: &RoomId, user_id: &UserId) -> Vec<UserId> {
        self.rooms
            .get(room_id)
            .map(|members| members.iter().filter(|m| *m != user_id).cloned().collect())
            .unwrap_or_default()
    }

    /// Removes `user_id` from `room_id`, deleting the room if it becomes empty.
    pub fn leave(&mut self, room_id: &RoomId, user_id: &UserId) -> bool {
        let Some(members) = self.rooms.get_mut(room_id) else {
            return false;
        };

        let removed = members.remove(user_id);
        if members.is_empty() {
            self.rooms.remove(room_id);
            info!("Room {} is empty, removing", room_id);
        }
        removed
    }

    /// Removes `user_id` from every room and returns the rooms it was in.
    pub fn leave_all(&mut self, user_id: &UserId) -> Vec<RoomId> {
        let affected: Vec<RoomId> = self
            .rooms
            .iter()
            .filter(|(_, members)| members.contains(user_id))
            .map(|(room_id, _)| room_id.clone())
            .collect();

        for room_id in &affected {
            self.leave(room_id, user_id);
        }
        affected
    }

    pub fn contains_room(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn is_member(&self, room_id: &RoomId, user_id: &UserId) -> bool {
        self.rooms
            .get(room_id)
            .is_some_and(|members| members.contains(user_id))
    }

    pub fn members(&self, room_id: &RoomId) -> Vec<UserId> {
        self.rooms
            .get(room_id)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.keys().cloned().collect()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
