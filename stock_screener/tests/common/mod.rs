#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use market_data_ingestor::{
    models::{
        bar::{Bar, BarSeries},
        request_params::BarsRequestParams,
    },
    providers::{DataProvider, ProviderError},
};
use stock_screener::config::ScanConfig;

/// In-memory provider with scripted bars, quotes, failures and delays.
#[derive(Default)]
pub struct MockProvider {
    bars: HashMap<String, Vec<Bar>>,
    prices: HashMap<String, f64>,
    failing: HashSet<String>,
    unknown: HashSet<String>,
    slow: HashSet<String>,
    slow_quotes: HashSet<String>,
    pub bar_calls: AtomicUsize,
    pub price_calls: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_closes(mut self, ticker: &str, closes: &[f64]) -> Self {
        self.bars.insert(ticker.to_string(), daily_bars(closes));
        self
    }

    pub fn with_price(mut self, ticker: &str, price: f64) -> Self {
        self.prices.insert(ticker.to_string(), price);
        self
    }

    /// Ticker with closes and a quote in one go.
    pub fn with_ticker(self, ticker: &str, closes: &[f64], price: f64) -> Self {
        self.with_closes(ticker, closes).with_price(ticker, price)
    }

    pub fn failing(mut self, ticker: &str) -> Self {
        self.failing.insert(ticker.to_string());
        self
    }

    /// Bars requests for `ticker` fail the way a delisted symbol does.
    pub fn unknown(mut self, ticker: &str) -> Self {
        self.unknown.insert(ticker.to_string());
        self
    }

    pub fn slow(mut self, ticker: &str) -> Self {
        self.slow.insert(ticker.to_string());
        self
    }

    /// Quote lookups for `ticker` stall well past any test deadline.
    pub fn slow_quote(mut self, ticker: &str) -> Self {
        self.slow_quotes.insert(ticker.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.bar_calls.load(Ordering::SeqCst) + self.price_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataProvider for MockProvider {
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        self.bar_calls.fetch_add(1, Ordering::SeqCst);
        let mut out = Vec::new();
        for symbol in params.symbols {
            if self.slow.contains(&symbol) {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            if self.failing.contains(&symbol) {
                return Err(ProviderError::Api {
                    status: 502,
                    message: format!("upstream unavailable for {symbol}"),
                });
            }
            if self.unknown.contains(&symbol) {
                return Err(ProviderError::SymbolNotFound(symbol));
            }
            if let Some(bars) = self.bars.get(&symbol) {
                out.push(BarSeries {
                    symbol,
                    timeframe: params.timeframe,
                    bars: bars.clone(),
                });
            }
        }
        Ok(out)
    }

    async fn latest_price(&self, symbol: &str) -> Result<f64, ProviderError> {
        self.price_calls.fetch_add(1, Ordering::SeqCst);
        if self.slow_quotes.contains(symbol) {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| ProviderError::Validation(format!("no quote for {symbol}")))
    }
}

pub fn scan_end() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 31, 16, 0, 0).unwrap()
}

/// One bar per day ending the day before [`scan_end`].
pub fn daily_bars(closes: &[f64]) -> Vec<Bar> {
    let n = closes.len() as i64;
    closes
        .iter()
        .enumerate()
        .map(|(i, c)| Bar::from_close(scan_end() - chrono::Duration::days(n - i as i64), *c))
        .collect()
}

/// 31 closes rising linearly from 100 to 130.
pub fn linear_ramp() -> Vec<f64> {
    (0..=30).map(|i| 100.0 + i as f64).collect()
}

/// Rising closes with an alternating wiggle of `amplitude`; ends at 130.
pub fn wiggly_ramp(amplitude: f64) -> Vec<f64> {
    (0..=30)
        .map(|i| 100.0 + i as f64 + if i % 2 == 1 { amplitude } else { 0.0 })
        .collect()
}

/// Defaults with near-instant retries and a one-second deadline.
pub fn fast_config() -> ScanConfig {
    ScanConfig {
        request_timeout_secs: 1,
        max_retries: 0,
        base_delay_ms: 1,
        ..ScanConfig::default()
    }
}

pub fn tickers(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}
