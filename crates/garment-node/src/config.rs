//! # Node Configuration
//!
//! Every setting has a default and can be overridden from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `CHANNEL_NAME` | `mychannel` |
//! | `CHAINCODE_NAME` | `basic` |
//! | `MSP_ID` | `Org1MSP` |
//! | `PEER_ENDPOINT` | `localhost:7051` |
//! | `PEER_HOST_ALIAS` | `peer0.org1.example.com` |
//! | `PORT` | `3000` |
//! | `GL_EVALUATE_TIMEOUT` | `5s` |
//! | `GL_ENDORSE_TIMEOUT` | `15s` |
//! | `GL_SUBMIT_TIMEOUT` | `5s` |
//! | `GL_COMMIT_STATUS_TIMEOUT` | `1m` |
//! | `GL_BATCH_TIMEOUT` | `200ms` |
//! | `GL_IDENTITY_SEED` | random identity |
//! | `GL_INIT_LEDGER` | `false` |

use gl_02_ledger_peer::PeerConfig;
use gl_03_gateway_client::humantime_serde::{format_duration, parse_duration};
use gl_03_gateway_client::GatewayConfig;
use gl_04_rest_api::ApiConfig;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NodeConfigError {
    #[error("{var} is not a valid {expected}: {value:?}")]
    InvalidValue {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Complete configuration of a garment node.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    pub gateway: GatewayConfig,
    pub peer: PeerConfig,
    pub api: ApiConfig,
    /// Hex seed of the client identity (random when absent)
    pub identity_seed: Option<String>,
    /// Submit `InitLedger` once the node is up
    pub init_ledger: bool,
}

impl NodeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, NodeConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration from `lookup`, which returns the value of a variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NodeConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = NodeConfig::default();
        let gateway = &mut config.gateway;

        if let Some(channel) = lookup("CHANNEL_NAME") {
            gateway.channel_name = channel;
        }
        if let Some(chaincode) = lookup("CHAINCODE_NAME") {
            gateway.chaincode_name = chaincode;
        }
        if let Some(msp_id) = lookup("MSP_ID") {
            gateway.msp_id = msp_id;
        }
        if let Some(endpoint) = lookup("PEER_ENDPOINT") {
            gateway.peer_endpoint = endpoint;
        }
        if let Some(alias) = lookup("PEER_HOST_ALIAS") {
            gateway.peer_host_alias = alias;
        }

        let deadlines = &mut gateway.deadlines;
        for (var, slot) in [
            ("GL_EVALUATE_TIMEOUT", &mut deadlines.evaluate),
            ("GL_ENDORSE_TIMEOUT", &mut deadlines.endorse),
            ("GL_SUBMIT_TIMEOUT", &mut deadlines.submit),
            ("GL_COMMIT_STATUS_TIMEOUT", &mut deadlines.commit_status),
        ] {
            if let Some(value) = lookup(var) {
                *slot = duration(var, &value)?;
            }
        }

        // the in-process peer serves whatever the client targets
        config.peer.channel_id = config.gateway.channel_name.clone();
        config.peer.chaincode_id = config.gateway.chaincode_name.clone();
        config.peer.msp_id = config.gateway.msp_id.clone();
        if let Some(value) = lookup("GL_BATCH_TIMEOUT") {
            let timeout = duration("GL_BATCH_TIMEOUT", &value)?;
            config.peer.batch_timeout_ms =
                u64::try_from(timeout.as_millis()).map_err(|_| NodeConfigError::InvalidValue {
                    var: "GL_BATCH_TIMEOUT",
                    expected: "duration of at most u64::MAX milliseconds",
                    value: value.clone(),
                })?;
        }

        if let Some(port) = lookup("PORT") {
            config.api.port = port.trim().parse().map_err(|_| NodeConfigError::InvalidValue {
                var: "PORT",
                expected: "port number",
                value: port.clone(),
            })?;
        }

        config.identity_seed = lookup("GL_IDENTITY_SEED").filter(|seed| !seed.trim().is_empty());
        config.init_ledger = lookup("GL_INIT_LEDGER").is_some_and(|v| is_truthy(&v));
        Ok(config)
    }

    /// Log the resolved input parameters.
    pub fn log_parameters(&self) {
        let gateway = &self.gateway;
        info!(
            channel_name = %gateway.channel_name,
            chaincode_name = %gateway.chaincode_name,
            msp_id = %gateway.msp_id,
            peer_endpoint = %gateway.peer_endpoint,
            peer_host_alias = %gateway.peer_host_alias,
            port = self.api.port,
            "input parameters"
        );
        info!(
            evaluate = %format_duration(gateway.deadlines.evaluate),
            endorse = %format_duration(gateway.deadlines.endorse),
            submit = %format_duration(gateway.deadlines.submit),
            commit_status = %format_duration(gateway.deadlines.commit_status),
            "deadlines"
        );
    }
}

fn duration(var: &'static str, value: &str) -> Result<Duration, NodeConfigError> {
    parse_duration(value).map_err(|_| NodeConfigError::InvalidValue {
        var,
        expected: "duration",
        value: value.to_string(),
    })
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
