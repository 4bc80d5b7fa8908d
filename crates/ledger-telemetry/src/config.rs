//! Logging settings for every Garment-Ledger process.

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Name reported on the startup line
    pub service_name: String,
    /// `EnvFilter` directive, e.g. `info` or `info,gl_02_ledger_peer=debug`
    pub log_level: String,
    /// Write logs to stdout at all
    pub console_output: bool,
    /// One JSON object per line instead of the human format
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "garment-ledger".into(),
            log_level: "info".into(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Read `GL_SERVICE_NAME`, `GL_LOG_LEVEL` (falling back to `RUST_LOG`),
    /// `GL_CONSOLE_OUTPUT` and `GL_JSON_LOGS` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |var: &str, default: bool| {
            lookup(var).map_or(default, |value| parse_flag(&value).unwrap_or(default))
        };

        Self {
            service_name: lookup("GL_SERVICE_NAME").unwrap_or(defaults.service_name),
            log_level: lookup("GL_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            console_output: flag("GL_CONSOLE_OUTPUT", defaults.console_output),
            json_logs: flag("GL_JSON_LOGS", defaults.json_logs),
        }
    }
}

/// Parse a boolean flag; `None` for anything unrecognised.
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
