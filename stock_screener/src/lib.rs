//! Momentum/volatility stock screener.
//!
//! A scan pulls a trailing window of bars for every ticker in a universe,
//! derives moving-average crossover signals and daily/cumulative returns,
//! summarizes each ticker by the volatility of its daily returns, prices the
//! survivors, and buckets them into fixed price bands with two rankings:
//! intraday (most volatile first) and delivery (least volatile first).
//!
//! Entry point: [`pipeline::run_scan`]. Market data comes in through the
//! [`market_data_ingestor::providers::DataProvider`] trait; see
//! [`providers::build_provider`] for the concrete vendors.

pub mod config;
pub mod enrichment;
pub mod errors;
pub mod indicators;
pub mod pipeline;
pub mod providers;
pub mod recommender;
pub mod render;
pub mod retry;
pub mod scanner;
pub mod universe;
pub mod volatility;

pub use errors::{ConfigError, ScanError};
pub use pipeline::{ScanOutcome, run_scan, run_scan_at};
