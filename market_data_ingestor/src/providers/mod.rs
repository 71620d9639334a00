//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, which serves as a unified interface
//! for fetching time-series bar data and current quotes from any market data vendor
//! (e.g., Alpaca, Yahoo Finance).
//!
//! Each concrete provider implementation should implement [`DataProvider`] to handle
//! vendor-specific API logic and validation.
//!
//! The trait is designed for async usage and supports dynamic dispatch (`dyn DataProvider`)
//! for runtime selection of providers.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use market_data_ingestor::models::{bar::BarSeries, request_params::BarsRequestParams};
//! use market_data_ingestor::providers::{DataProvider, ProviderError};
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl DataProvider for MyProvider {
//!     async fn fetch_bars(
//!         &self,
//!         _params: BarsRequestParams,
//!     ) -> Result<Vec<BarSeries>, ProviderError> {
//!         Ok(vec![])
//!     }
//!
//!     async fn latest_price(&self, _symbol: &str) -> Result<f64, ProviderError> {
//!         Err(ProviderError::Internal("no quotes here".into()))
//!     }
//! }
//! ```

pub mod alpaca_rest;
mod errors;
#[cfg(feature = "yahoo")]
pub mod yahoo;

pub use errors::{ProviderError, ProviderInitError};

use async_trait::async_trait;

use crate::models::{bar::BarSeries, request_params::BarsRequestParams};

/// Trait for fetching market data from a provider.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches time-series bar data for the given request parameters.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<BarSeries>)` - One series per symbol the vendor had data for.
    ///   A symbol without data may be absent or carry an empty `bars` vector;
    ///   callers treat both as "no data".
    /// * `Err(ProviderError)` - If the request fails.
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError>;

    /// Returns the most recent traded/quoted price for `symbol`.
    async fn latest_price(&self, symbol: &str) -> Result<f64, ProviderError>;
}
