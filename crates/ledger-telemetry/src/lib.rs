//! # Ledger Telemetry
//!
//! Observability shared by every Garment-Ledger crate.
//!
//! Logs go through `tracing-subscriber` with an `EnvFilter`, either human
//! readable or one JSON object per line. Metrics are Prometheus collectors
//! for the contract, the peer and the gateway client, exported as text by
//! [`encode_metrics`].
//!
//! ```rust,ignore
//! use ledger_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! ```
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GL_SERVICE_NAME` | `garment-ledger` | Name on the startup line |
//! | `GL_LOG_LEVEL` / `RUST_LOG` | `info` | `EnvFilter` directive |
//! | `GL_JSON_LOGS` | `false` | JSON formatted logs |
//! | `GL_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, PhaseTimer, BLOCK_HEIGHT,
    CONTRACT_INVOCATIONS, GATEWAY_PHASE_DURATION, GATEWAY_TRANSACTIONS, PEER_TRANSACTIONS_COMMITTED,
};

use thiserror::Error;

/// Failures while setting up logs or metrics.
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("logging setup failed: {0}")]
    LoggingInit(String),

    /// Collector registration or encoding failed.
    #[error("metrics failure: {0}")]
    MetricsInit(String),

    /// The log filter directive does not parse.
    #[error("invalid log filter: {0}")]
    Config(String),
}

/// Register the collectors and install the global subscriber.
///
/// Hold the returned guard until the process exits.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics = register_metrics()?;
    init_logging(&config)?;

    tracing::info!(
        service = %config.service_name,
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "telemetry ready"
    );

    Ok(TelemetryGuard { _metrics: metrics })
}

/// Keeps the registered collectors alive.
pub struct TelemetryGuard {
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("telemetry stopped");
    }
}

/// Log an event about one transaction, tagged with the component and tx id.
#[macro_export]
macro_rules! log_tx_event {
    ($level:ident, $component:expr, $msg:expr, $tx_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            tx_id = %$tx_id,
            $($($field)*,)?
            $msg
        )
    };
}
