//! Runtime configuration, read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::tfl::TflConfig;

/// Error returned for an unusable configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}: {value:?} {reason}")]
pub struct ConfigError {
    var: &'static str,
    value: String,
    reason: &'static str,
}

/// Configuration for one bridge process.
#[derive(Debug, Clone, Default)]
pub struct BridgeConfig {
    /// Upstream API settings.
    pub tfl: TflConfig,

    /// Serve this saved response instead of calling TfL.
    pub mock_file: Option<PathBuf>,

    /// Per-message acknowledgement timeout; `None` waits indefinitely.
    pub send_timeout: Option<Duration>,
}

impl BridgeConfig {
    /// Read configuration from process environment variables.
    ///
    /// | variable | effect |
    /// |----------|--------|
    /// | `TFL_BASE_URL` | upstream base URL |
    /// | `TFL_APP_KEY` | TfL application key |
    /// | `TFL_TIMEOUT_SECS` | HTTP request timeout |
    /// | `TFL_MOCK_FILE` | saved response to serve instead of TfL |
    /// | `DEVICE_SEND_TIMEOUT_MS` | per-message send timeout |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unset and empty variables keep their defaults. A timeout of zero is
    /// rejected; leave the variable unset to wait indefinitely.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let mut tfl = TflConfig::new();
        if let Some(url) = get("TFL_BASE_URL") {
            tfl = tfl.with_base_url(url);
        }
        if let Some(key) = get("TFL_APP_KEY") {
            tfl = tfl.with_app_key(key);
        }
        if let Some(secs) = get("TFL_TIMEOUT_SECS") {
            let secs = parse_timeout("TFL_TIMEOUT_SECS", &secs)?;
            tfl = tfl.with_timeout(Duration::from_secs(secs));
        }

        let send_timeout = get("DEVICE_SEND_TIMEOUT_MS")
            .map(|ms| parse_timeout("DEVICE_SEND_TIMEOUT_MS", &ms).map(Duration::from_millis))
            .transpose()?;

        Ok(Self {
            tfl,
            mock_file: get("TFL_MOCK_FILE").map(PathBuf::from),
            send_timeout,
        })
    }

    /// Set a saved response to serve instead of calling TfL.
    pub fn with_mock_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.mock_file = Some(path.into());
        self
    }

    /// Set the per-message send timeout.
    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = Some(timeout);
        self
    }
}

/// Parse a timeout, which must be a positive whole number.
fn parse_timeout(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    let invalid = |reason| ConfigError {
        var,
        value: value.to_string(),
        reason,
    };

    match value.trim().parse() {
        Ok(0) => Err(invalid("must be greater than zero")),
        Ok(n) => Ok(n),
        Err(_) => Err(invalid("is not a whole number")),
    }
}
