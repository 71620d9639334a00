use market_data_ingestor::models::lookback::LookbackError;
use thiserror::Error;

/// A [`ScanConfig`](crate::config::ScanConfig) that cannot drive a scan.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be greater than zero")]
    ZeroWindow { name: &'static str },

    #[error("short_window ({short}) must be smaller than long_window ({long})")]
    WindowOrder { short: usize, long: usize },

    #[error("concurrency must be greater than zero")]
    ZeroConcurrency,

    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error(transparent)]
    Lookback(#[from] LookbackError),
}

/// The only ways a scan fails as a whole. Per-ticker problems never surface here.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid scan configuration: {0}")]
    Config(#[from] ConfigError),
}
