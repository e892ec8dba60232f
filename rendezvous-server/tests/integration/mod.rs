
use std::net::SocketAddr;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::Level;

use rendezvous_core::{ConnectionId, SignalPayload};
use rendezvous_server::{
    Effect, Relay, RelayConfig, Server, ServerConfig, ServerError, SignalingOutput,
    SignalingService, TransportEvent,
};

use crate::utils::{MockSignalingOutput, room, user};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// A relay wired to a mock output, driven one event at a time.
pub struct TestRelay {
    relay: Relay,
    output: MockSignalingOutput,
}

impl TestRelay {
    pub fn new() -> Self {
        Self::with_config(RelayConfig::default())
    }

    pub fn with_config(config: RelayConfig) -> Self {
        Self {
            relay: Relay::new(config),
            output: MockSignalingOutput::new_stored_only(),
        }
    }

    pub fn relay(&self) -> &Relay {
        &self.relay
    }

    pub fn output(&self) -> &MockSignalingOutput {
        &self.output
    }

    pub async fn apply(
        &mut self,
        connection: ConnectionId,
        event: TransportEvent,
    ) -> Vec<Effect> {
        let effects = self.relay.handle(connection, event);
        self.output.deliver(effects.clone()).await;
        effects
    }

    pub async fn connect(&mut self) -> ConnectionId {
        let connection = ConnectionId::new();
        self.apply(connection, TransportEvent::Connected).await;
        connection
    }

    pub async fn join(
        &mut self,
        connection: ConnectionId,
        room_id: &str,
        user_id: &str,
    ) -> Vec<Effect> {
        self.apply(
            connection,
            TransportEvent::JoinRoom {
                room_id: room(room_id),
                user_id: user(user_id),
            },
        )
        .await
    }

    pub async fn signal(
        &mut self,
        connection: ConnectionId,
        payload: SignalPayload,
    ) -> Vec<Effect> {
        self.apply(connection, TransportEvent::Signal(payload)).await
    }

    pub async fn disconnect(&mut self, connection: ConnectionId) -> Vec<Effect> {
        self.apply(connection, TransportEvent::Disconnected).await
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub service: SignalingService,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Result<(), ServerError>>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(ServerConfig::default()).await
    }

    pub async fn start_with(config: ServerConfig) -> Self {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..config
        };

        let server = Server::bind(config).await.expect("Failed to bind test server");
        let addr = server.local_addr().expect("No local address");
        let service = server.service();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(server.run_until(async move {
            let _ = shutdown_rx.await;
        }));

        Self {
            addr,
            service,
            shutdown_tx: Some(shutdown_tx),
            handle,
        }
    }

    /// Requests shutdown and returns the server task.
    pub fn shutdown(mut self) -> JoinHandle<Result<(), ServerError>> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        self.handle
    }
}
