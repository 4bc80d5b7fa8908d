//! Garment node entry point.

use anyhow::{Context, Result};
use garment_node::{GarmentNode, NodeConfig};
use ledger_telemetry::{init_telemetry, TelemetryConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry =
        init_telemetry(TelemetryConfig::from_env()).context("failed to initialise telemetry")?;

    let config = NodeConfig::from_env().context("invalid configuration")?;
    config.log_parameters();

    let node = GarmentNode::start(config).context("failed to start garment node")?;
    if let Err(e) = node.bootstrap().await {
        error!(error = %e, "ledger initialisation failed");
        node.shutdown().await;
        return Err(e).context("failed to initialise ledger");
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
        }
        info!("shutdown signal received");
    };

    info!("garment node is running, press Ctrl+C to stop");
    let served = gl_04_rest_api::serve(&node.config().api, node.router(), shutdown).await;

    node.shutdown().await;
    served.context("HTTP server failed")
}
