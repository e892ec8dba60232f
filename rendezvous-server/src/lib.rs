//! WebRTC signaling relay.
//!
//! Peers join named rooms under a self-chosen identity, learn who else is
//! present, and exchange offers, answers and ICE candidates addressed by
//! identity. Media never passes through the relay.
//!
//! ```text
//! rendezvous-server
//!   ├─ Server              (axum listener, /ws and /health)
//!   ├─ SignalingService    (live connections + relay lock)
//!   ├─ Relay               (event -> effects)
//!   │    ├─ ConnectionRegistry
//!   │    └─ RoomDirectory
//!   └─ ServerConfig        (CLI / environment)
//! ```

mod config;
mod error;
mod registry;
mod room;
mod server;
mod signaling;
mod transport;

pub use config::{Cli, ServerConfig};
pub use error::{ClientRequestError, ConfigError, ServerError};
pub use registry::ConnectionRegistry;
pub use room::RoomDirectory;
pub use server::{HEALTH_RESPONSE, Server, health, router, shutdown_signal};
pub use signaling::{
    Effect, Relay, RelayConfig, SignalingOutput, SignalingService, decode_frame, ws_handler,
};
pub use transport::TransportEvent;
