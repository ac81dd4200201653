//! Arbor Visualization Server
//!
//! Serve binary search tree, splay tree and heap animations over HTTP.

use arbor_vis::{VisConfig, VisServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arbor_vis=info,arbor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = VisConfig::from_env()?;
    tracing::info!(
        addr = %config.addr,
        step_ms = config.step_ms,
        autoplay = config.autoplay,
        "Starting Arbor visualizer"
    );

    VisServer::new(config).serve().await?;
    Ok(())
}
