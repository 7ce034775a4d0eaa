//! slircbot - Straylight IRC bot.
//!
//! Usage: `slircbot [config.toml]`

use anyhow::Context;
use slirc_bot::config::{Config, LogFormat};
use slirc_bot::network::Connection;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path))?;

    init_tracing(&config);
    info!(
        path = %config_path,
        connections = config.connections.len(),
        "Starting slircbot"
    );

    let (shutdown_tx, _) = broadcast::channel(1);
    let mut tasks = JoinSet::new();
    for connection_config in config.connections {
        let connection = Connection::new(connection_config);
        tasks.spawn(connection.run(shutdown_tx.subscribe()));
    }

    {
        let shutdown_tx = shutdown_tx.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted - disconnecting");
                let _ = shutdown_tx.send(());
            }
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!(error = %e, kind = e.kind(), "Connection ended"),
            Err(e) => error!(error = %e, "Connection task failed"),
        }
    }

    info!("All connections closed");
    Ok(())
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    match config.log_format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
