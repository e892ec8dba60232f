use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::signaling::{SignalingService, ws_handler};
use axum::Router;
use axum::routing::get;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

pub const HEALTH_RESPONSE: &str = "Signaling server is running";

pub async fn health() -> &'static str {
    HEALTH_RESPONSE
}

pub fn router(service: SignalingService, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(service)
}

/// Bound signaling server, ready to [`run`](Server::run).
pub struct Server {
    listener: TcpListener,
    service: SignalingService,
    cors: CorsLayer,
}

impl Server {
    /// Validate the configuration and bind the listener.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let cors = config.cors_layer()?;
        let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
        let service = SignalingService::new(config.relay_config());

        Ok(Self {
            listener,
            service,
            cors,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    pub fn service(&self) -> SignalingService {
        self.service.clone()
    }

    /// Serve until Ctrl-C or SIGTERM.
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` resolves, then close every signaling
    /// connection before returning.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let service = self.service.clone();
        let app = router(self.service, self.cors);

        axum::serve(self.listener, app)
            .with_graceful_shutdown(async move {
                shutdown.await;
                info!("Shutdown requested");
                service.close_all();
            })
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
