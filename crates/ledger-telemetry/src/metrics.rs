//! Prometheus metrics for Garment-Ledger components.
//!
//! All metrics follow the naming convention: `gl_<component>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, Gauge, HistogramOpts, HistogramVec, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;
use std::time::Instant;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // CONTRACT METRICS
    // =========================================================================

    /// Contract invocations by wire function name and outcome
    pub static ref CONTRACT_INVOCATIONS: CounterVec = CounterVec::new(
        Opts::new("gl_contract_invocations_total", "Contract invocations by function"),
        &["function", "outcome"]  // outcome: ok/rejected/error
    ).expect("metric creation failed");

    // =========================================================================
    // PEER METRICS
    // =========================================================================

    /// Committed transactions by validation code
    pub static ref PEER_TRANSACTIONS_COMMITTED: CounterVec = CounterVec::new(
        Opts::new("gl_peer_transactions_committed_total", "Transactions committed by validation code"),
        &["code"]
    ).expect("metric creation failed");

    /// Height of the last committed block
    pub static ref BLOCK_HEIGHT: Gauge = Gauge::new(
        "gl_peer_block_height",
        "Number of blocks committed to the ledger"
    ).expect("metric creation failed");

    // =========================================================================
    // GATEWAY METRICS
    // =========================================================================

    /// Client transactions by kind and outcome
    pub static ref GATEWAY_TRANSACTIONS: CounterVec = CounterVec::new(
        Opts::new("gl_gateway_transactions_total", "Gateway transactions by kind and outcome"),
        &["kind", "outcome"]  // kind: evaluate/submit, outcome: ok/error/deadline_exceeded
    ).expect("metric creation failed");

    /// Duration of each protocol phase
    pub static ref GATEWAY_PHASE_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "gl_gateway_phase_duration_seconds",
            "Time spent in each gateway protocol phase"
        ).buckets(exponential_buckets(0.001, 2.0, 16).expect("bucket creation failed")),
        &["phase"]  // evaluate/endorse/submit/commit_status
    ).expect("metric creation failed");
}

/// Handle to the registered collectors
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Registering twice is not an error; the second call returns a handle to
/// the already registered collectors.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(CONTRACT_INVOCATIONS.clone()),
        Box::new(PEER_TRANSACTIONS_COMMITTED.clone()),
        Box::new(BLOCK_HEIGHT.clone()),
        Box::new(GATEWAY_TRANSACTIONS.clone()),
        Box::new(GATEWAY_PHASE_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard observing a labelled phase duration on drop.
pub struct PhaseTimer {
    phase: &'static str,
    start: Instant,
}

impl PhaseTimer {
    /// Start timing `phase`.
    pub fn start(phase: &'static str) -> Self {
        Self {
            phase,
            start: Instant::now(),
        }
    }
}

impl Drop for PhaseTimer {
    fn drop(&mut self) {
        GATEWAY_PHASE_DURATION
            .with_label_values(&[self.phase])
            .observe(self.start.elapsed().as_secs_f64());
    }
}
