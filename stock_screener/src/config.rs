//! Scan configuration: defaults, validation, and TOML loading.
//!
//! Every field is optional in the file; anything left out takes the default
//! from [`ScanConfig::default`]. A config is checked with
//! [`ScanConfig::validate`] before any ticker is fetched.
//!
//! ```toml
//! short_window = 10
//! long_window = 30
//! lookback = "1mo"
//! timeframe = "1D"
//! concurrency = 8
//! ```

use std::{path::Path, time::Duration};

use anyhow::Context;
use market_data_ingestor::models::{lookback::Lookback, timeframe::TimeFrame};
use serde::{Deserialize, Serialize};

use crate::{errors::ConfigError, retry::RetryPolicy};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Trailing window of the fast moving average, in bars.
    pub short_window: usize,
    /// Trailing window of the slow moving average, in bars.
    pub long_window: usize,
    /// How much history to pull per ticker (e.g. "1mo", "3mo", "1y").
    pub lookback: Lookback,
    /// Bar interval requested from the provider.
    pub timeframe: TimeFrame,
    /// Upper bound on in-flight provider calls.
    pub concurrency: usize,
    /// Per-call deadline for every provider request.
    pub request_timeout_secs: u64,
    /// Extra attempts after a transient provider failure.
    pub max_retries: u32,
    /// First backoff delay; doubles on every retry.
    pub base_delay_ms: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            short_window: 10,
            long_window: 30,
            lookback: Lookback::one_month(),
            timeframe: TimeFrame::day(),
            concurrency: 8,
            request_timeout_secs: 10,
            max_retries: 2,
            base_delay_ms: 500,
        }
    }
}

impl ScanConfig {
    /// Rejects configurations that cannot produce a meaningful scan.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.short_window == 0 {
            return Err(ConfigError::ZeroWindow {
                name: "short_window",
            });
        }
        if self.long_window == 0 {
            return Err(ConfigError::ZeroWindow {
                name: "long_window",
            });
        }
        if self.short_window >= self.long_window {
            return Err(ConfigError::WindowOrder {
                short: self.short_window,
                long: self.long_window,
            });
        }
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            timeout: Duration::from_secs(self.request_timeout_secs),
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.base_delay_ms),
        }
    }
}

/// Parse and validate a scan config from a TOML string.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<ScanConfig> {
    let cfg: ScanConfig = toml::from_str(toml_str).context("failed to parse scan config TOML")?;
    cfg.validate().context("scan config failed validation")?;
    Ok(cfg)
}

/// Read a scan config TOML file from disk, parse, and validate it.
pub fn load_config_path(path: impl AsRef<Path>) -> anyhow::Result<ScanConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read scan config file {}", path.as_ref().display()))?;
    load_config_str(&text)
}
