// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cert_manager_csi_operator::config::Config;
use cert_manager_csi_operator::webhook::WebhookServer;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting cert-manager CSI operator");

    // Load and validate configuration, an invalid configuration is fatal
    let config = Config::load().context("Invalid operator configuration")?;
    info!(
        "Configuration loaded: namespace={:?}, annotation_key={:?}, issuer={}, mount_path={}",
        config.csi.namespace, config.csi.annotation_key, config.csi.issuer_name, config.csi.mount_path
    );

    let server = WebhookServer::new(&config).context("Failed to set up webhook server")?;
    server.run(shutdown_signal()).await?;

    info!("Webhook server stopped");
    Ok(())
}

/// Completes on ctrl-c or, on unix, SIGTERM as sent by the kubelet
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
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
