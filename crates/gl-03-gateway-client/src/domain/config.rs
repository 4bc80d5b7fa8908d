//! Gateway configuration with validation.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::Phase;
use crate::errors::ConfigError;

/// Client gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Channel the contract is deployed on (default: `mychannel`)
    pub channel_name: String,
    /// Deployed contract name (default: `basic`)
    pub chaincode_name: String,
    /// Membership service provider of the client identity
    pub msp_id: String,
    /// Address of the gateway peer
    pub peer_endpoint: String,
    /// Host name the peer's certificate is issued for
    pub peer_host_alias: String,
    /// Per-phase deadlines
    pub deadlines: DeadlineConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            channel_name: "mychannel".to_string(),
            chaincode_name: "basic".to_string(),
            msp_id: "Org1MSP".to_string(),
            peer_endpoint: "localhost:7051".to_string(),
            peer_host_alias: "peer0.org1.example.com".to_string(),
            deadlines: DeadlineConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_name.trim().is_empty() {
            return Err(ConfigError::InvalidName("channel name cannot be empty".into()));
        }
        if self.chaincode_name.trim().is_empty() {
            return Err(ConfigError::InvalidName(
                "chaincode name cannot be empty".into(),
            ));
        }
        if self.msp_id.trim().is_empty() {
            return Err(ConfigError::InvalidName("MSP id cannot be empty".into()));
        }
        self.deadlines.validate()
    }
}

/// Deadlines for each protocol phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeadlineConfig {
    #[serde(with = "humantime_serde")]
    pub evaluate: Duration,
    #[serde(with = "humantime_serde")]
    pub endorse: Duration,
    #[serde(with = "humantime_serde")]
    pub submit: Duration,
    #[serde(with = "humantime_serde")]
    pub commit_status: Duration,
}

impl Default for DeadlineConfig {
    fn default() -> Self {
        Self {
            evaluate: Duration::from_secs(5),
            endorse: Duration::from_secs(15),
            submit: Duration::from_secs(5),
            commit_status: Duration::from_secs(60),
        }
    }
}

impl DeadlineConfig {
    pub fn for_phase(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Evaluate => self.evaluate,
            Phase::Endorse => self.endorse,
            Phase::Submit => self.submit,
            Phase::CommitStatus => self.commit_status,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for phase in [
            Phase::Evaluate,
            Phase::Endorse,
            Phase::Submit,
            Phase::CommitStatus,
        ] {
            if self.for_phase(phase).is_zero() {
                return Err(ConfigError::InvalidDeadline(format!(
                    "{} deadline cannot be 0",
                    phase
                )));
            }
        }
        Ok(())
    }
}

/// Humantime-style duration strings: `"250ms"`, `"5s"`, `"1m"`, or plain seconds.
pub mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_duration(*duration))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }

    /// Whole seconds when exact, milliseconds otherwise.
    pub fn format_duration(duration: Duration) -> String {
        if duration.subsec_nanos() == 0 {
            format!("{}s", duration.as_secs())
        } else {
            format!("{}ms", duration.as_millis())
        }
    }

    pub fn parse_duration(s: &str) -> Result<Duration, &'static str> {
        let s = s.trim();
        if let Some(ms) = s.strip_suffix("ms") {
            ms.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| "invalid milliseconds")
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid seconds")
        } else if let Some(mins) = s.strip_suffix('m') {
            mins.trim()
                .parse::<u64>()
                .map_err(|_| "invalid minutes")?
                .checked_mul(60)
                .map(Duration::from_secs)
                .ok_or("minutes out of range")
        } else {
            s.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid duration format")
        }
    }
}
