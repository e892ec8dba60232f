//! Signaling relay binary.
//!
//! ```bash
//! rendezvous-server --port 3000 --allowed-origins https://app.example
//! PORT=8080 RUST_LOG=debug rendezvous-server
//! ```

use anyhow::Context;
use clap::Parser;
use rendezvous_server::{Cli, Server};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    info!("Initializing signaling server...");

    let config = cli.into_config();
    info!("Allowed origins: {:?}", config.allowed_origins);

    let server = Server::bind(config)
        .await
        .context("failed to start signaling server")?;

    info!("Signaling server listening on http://{}", server.local_addr()?);

    server.run().await?;

    Ok(())
}
