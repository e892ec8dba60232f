use crate::model::room::RoomId;
use crate::model::user::UserId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Addressing shared by every signal variant.
///
/// Fields the relay does not know about are kept in `extra` so the payload
/// reaches the target exactly as the sender wrote it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalRoute {
    pub sender_user_id: UserId,
    pub target_user_id: UserId,
    pub room_id: RoomId,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SignalRoute {
    pub fn new(
        sender: impl Into<UserId>,
        target: impl Into<UserId>,
        room: impl Into<RoomId>,
    ) -> Self {
        Self {
            sender_user_id: sender.into(),
            target_user_id: target.into(),
            room_id: room.into(),
            extra: Map::new(),
        }
    }
}

/// Session negotiation message relayed between two peers.
///
/// `sdp` and `candidate` are opaque to the relay and never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SignalPayload {
    Offer {
        sdp: Value,
        #[serde(flatten)]
        route: SignalRoute,
    },
    Answer {
        sdp: Value,
        #[serde(flatten)]
        route: SignalRoute,
    },
    Candidate {
        /// `None` when the field was absent, `Some(None)` when it was `null`
        /// (end-of-candidates). Both shapes are forwarded as received.
        #[serde(
            default,
            deserialize_with = "present",
            skip_serializing_if = "Option::is_none"
        )]
        candidate: Option<Option<Value>>,
        #[serde(flatten)]
        route: SignalRoute,
    },
}

/// Marks a field as present, so `null` is kept apart from a missing field.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Offer,
    Answer,
    Candidate,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignalKind::Offer => "offer",
            SignalKind::Answer => "answer",
            SignalKind::Candidate => "candidate",
        };
        f.write_str(name)
    }
}

impl SignalPayload {
    pub fn kind(&self) -> SignalKind {
        match self {
            SignalPayload::Offer { .. } => SignalKind::Offer,
            SignalPayload::Answer { .. } => SignalKind::Answer,
            SignalPayload::Candidate { .. } => SignalKind::Candidate,
        }
    }

    pub fn route(&self) -> &SignalRoute {
        match self {
            SignalPayload::Offer { route, .. }
            | SignalPayload::Answer { route, .. }
            | SignalPayload::Candidate { route, .. } => route,
        }
    }

    pub fn sender(&self) -> &UserId {
        &self.route().sender_user_id
    }

    pub fn target(&self) -> &UserId {
        &self.route().target_user_id
    }

    pub fn room_id(&self) -> &RoomId {
        &self.route().room_id
    }
}

/// Frames a client may send over its signaling connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: RoomId, user_id: UserId },
    Signal(SignalPayload),
}

/// Frames the relay sends to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Snapshot of the room sent to a joiner, never containing the joiner.
    ExistingUsers { users: Vec<UserId> },
    #[serde(rename_all = "camelCase")]
    UserJoined { user_id: UserId },
    #[serde(rename_all = "camelCase")]
    UserLeft { user_id: UserId },
    Signal(SignalPayload),
    #[serde(rename_all = "camelCase")]
    SignalUndeliverable { target_user_id: UserId },
    Error { message: String },
}
