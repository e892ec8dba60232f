use crate::error::ConfigError;
use crate::signaling::RelayConfig;
use axum::http::HeaderValue;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host or address to listen on
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS. `*` allows any origin.
    pub allowed_origins: Vec<String>,
    pub notify_undeliverable: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            allowed_origins: vec!["*".to_string()],
            notify_undeliverable: false,
        }
    }
}

impl ServerConfig {
    pub fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            notify_undeliverable: self.notify_undeliverable,
        }
    }

    pub fn cors_layer(&self) -> Result<CorsLayer, ConfigError> {
        let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

        if self.allowed_origins.iter().any(|origin| origin == "*") {
            return Ok(cors.allow_origin(Any));
        }

        let origins = self
            .allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| ConfigError::InvalidOrigin(origin.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(cors.allow_origin(origins))
    }
}

/// WebRTC signaling relay
#[derive(Parser, Debug)]
#[command(name = "rendezvous-server")]
#[command(about = "WebRTC signaling relay over WebSocket")]
#[command(version)]
pub struct Cli {
    /// Host or address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Comma separated list of allowed CORS origins, `*` for any
    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',', default_value = "*")]
    pub allowed_origins: Vec<String>,

    /// Notify senders when a signal's target is not connected
    #[arg(long, env = "NOTIFY_UNDELIVERABLE")]
    pub notify_undeliverable: bool,

    /// Log level (trace, debug, info, warn, error), overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn into_config(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            allowed_origins: self
                .allowed_origins
                .into_iter()
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            notify_undeliverable: self.notify_undeliverable,
        }
    }
}
